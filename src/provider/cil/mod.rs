//! Metadata provider over ECMA-335 metadata in PE images.
//!
//! [`CilMetadataProvider`] opens a module with [`CilModule`] (memory mapped from disk, or from an
//! owned buffer) and joins its metadata tables into a [`ModuleTypes`] snapshot. What counts as
//! exported, and how deep nested structures are followed, is controlled by [`LoaderConfig`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotcontract::{render_all, CilMetadataProvider, LoaderConfig};
//!
//! let provider = CilMetadataProvider::with_config(LoaderConfig::minimal());
//! for contract in render_all(&["First.dll", "Second.dll"], &provider) {
//!     match contract {
//!         Ok(text) => print!("{text}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

mod config;
mod extract;
mod names;

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    contract::ModuleTypes, metadata::cilmodule::CilModule, provider::MetadataProvider, Error,
    Result,
};

pub use config::LoaderConfig;

use extract::TypeExtractor;

/// A module opened by [`CilMetadataProvider`].
pub struct CilModuleHandle {
    path: PathBuf,
    module: CilModule,
}

impl CilModuleHandle {
    /// Path the module was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed module.
    #[must_use]
    pub fn module(&self) -> &CilModule {
        &self.module
    }
}

/// Reads exported types straight from a module's metadata tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct CilMetadataProvider {
    config: LoaderConfig,
}

impl CilMetadataProvider {
    /// A provider with [`LoaderConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider with a custom configuration.
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        CilMetadataProvider { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a module image that is already in memory; `path` only labels errors.
    ///
    /// # Errors
    /// Returns [`Error::ModuleLoad`] if `data` is not a .NET module.
    pub fn load_bytes(&self, path: impl Into<PathBuf>, data: Vec<u8>) -> Result<CilModuleHandle> {
        let path = path.into();
        match CilModule::from_mem(data) {
            Ok(module) => Ok(CilModuleHandle { path, module }),
            Err(error) => Err(load_error(path, error)),
        }
    }
}

fn load_error(path: PathBuf, error: Error) -> Error {
    Error::ModuleLoad {
        path,
        source: Box::new(error),
    }
}

impl MetadataProvider for CilMetadataProvider {
    type Handle = CilModuleHandle;

    fn load_module(&self, path: &Path) -> Result<CilModuleHandle> {
        debug!("loading {}", path.display());

        match CilModule::from_file(path) {
            Ok(module) => Ok(CilModuleHandle {
                path: path.to_path_buf(),
                module,
            }),
            Err(error) => Err(load_error(path.to_path_buf(), error)),
        }
    }

    fn enumerate_types(&self, module: &CilModuleHandle) -> Result<ModuleTypes> {
        module
            .module
            .with_metadata(|metadata| TypeExtractor::new(metadata, self.config).extract())
            .map_err(|error| load_error(module.path.clone(), error))
    }
}
