//! Sources of [`ModuleTypes`] snapshots.
//!
//! A [`MetadataProvider`] turns a path into a loaded module handle and the handle into the
//! type snapshot that [`crate::contract`] renders. Two providers ship with the crate:
//!
//! - [`CilMetadataProvider`] reads ECMA-335 metadata out of a PE image on disk
//! - [`InMemoryProvider`] serves prepared snapshots, for tests and for tools that build their
//!   models some other way
//!
//! # Examples
//!
//! ```rust
//! use dotcontract::{render_file, InMemoryProvider, ModuleTypes};
//! use std::path::Path;
//!
//! let provider = InMemoryProvider::new().with_module("Empty.dll", ModuleTypes::new("Empty"));
//! let contract = render_file(Path::new("Empty.dll"), &provider)?;
//! assert_eq!(contract, "# Module: Empty\n\n");
//! # Ok::<(), dotcontract::Error>(())
//! ```

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{contract::ModuleTypes, Error, Result};

pub mod cil;

pub use cil::{CilMetadataProvider, CilModuleHandle, LoaderConfig};

/// Loads modules and enumerates the types they define.
///
/// Implementations must be usable from several threads at once when passed to
/// [`crate::render_all`], which is why that function requires `Sync`.
pub trait MetadataProvider {
    /// A loaded module
    type Handle;

    /// Open the module at `path`.
    ///
    /// # Errors
    /// Returns [`Error::ModuleLoad`] carrying `path` and the underlying failure.
    fn load_module(&self, path: &Path) -> Result<Self::Handle>;

    /// Snapshot every exported type of `module`.
    ///
    /// Types that fail to load individually are reported through
    /// [`ModuleTypes::diagnostics`], not as an error.
    ///
    /// # Errors
    /// Returns an error only if the module as a whole cannot be enumerated.
    fn enumerate_types(&self, module: &Self::Handle) -> Result<ModuleTypes>;
}

/// A provider backed by snapshots registered in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    modules: HashMap<PathBuf, Arc<ModuleTypes>>,
}

impl InMemoryProvider {
    /// An empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under `path`, builder style.
    #[must_use]
    pub fn with_module(mut self, path: impl Into<PathBuf>, module: ModuleTypes) -> Self {
        self.insert(path, module);
        self
    }

    /// Register `module` under `path`, replacing any previous snapshot.
    pub fn insert(&mut self, path: impl Into<PathBuf>, module: ModuleTypes) {
        self.modules.insert(path.into(), Arc::new(module));
    }
}

impl MetadataProvider for InMemoryProvider {
    type Handle = Arc<ModuleTypes>;

    fn load_module(&self, path: &Path) -> Result<Self::Handle> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ModuleLoad {
                path: path.to_path_buf(),
                source: Box::new(Error::ModuleNotFound(path.to_path_buf())),
            })
    }

    fn enumerate_types(&self, module: &Self::Handle) -> Result<ModuleTypes> {
        Ok(module.as_ref().clone())
    }
}
