// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dotcontract
//!
//! Extracts the public surface of a .NET module and renders it as a canonical, diffable
//! Markdown contract with C#-like member declarations.
//!
//! ## Features
//!
//! - **Deterministic output** - identical modules render to byte-identical text
//! - **No runtime needed** - ECMA-335 metadata is read straight out of the PE image
//! - **Graceful degradation** - types that fail to load are listed, not fatal
//! - **Pluggable sources** - anything implementing [`MetadataProvider`] can feed the renderer
//! - **Parallel batches** - [`render_all`] renders many modules across threads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotcontract::prelude::*;
//! use std::path::Path;
//!
//! let provider = CilMetadataProvider::new();
//! let contract = render_file(Path::new("Contoso.Shapes.dll"), &provider)?;
//! print!("{contract}");
//! # Ok::<(), dotcontract::Error>(())
//! ```
//!
//! ## Output Layout
//!
//! ````text
//! # Module: Contoso.Shapes
//!
//! ## Interfaces
//! ### IShape
//! ```csharp
//! // Properties
//! public double Area { get; }
//! ```
//!
//! ## Extension Methods
//! public IShape Scale(this IShape shape, double factor);
//! ````
//!
//! Types are grouped into [`Category`] sections in a fixed order, and sorted by name inside
//! each. Members named in [`EXCLUDED_MEMBER_NAMES`], constructors and accessor methods never
//! appear.
//!
//! ## Architecture
//!
//! - [`contract`] - the data model, classification, type formatting and text rendering
//! - [`provider`] - the [`MetadataProvider`] trait, [`CilMetadataProvider`] and
//!   [`InMemoryProvider`]
//! - [`metadata`] - ECMA-335 streams, tables and signatures read by the CIL provider
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. A module that cannot be opened yields
//! [`Error::ModuleLoad`]; problems confined to a single type or member only degrade the output.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use dotcontract::prelude::*;
///
/// let provider = CilMetadataProvider::with_config(LoaderConfig::minimal());
/// let results = render_all(&["A.dll", "B.dll"], &provider);
/// assert_eq!(results.len(), 2);
/// ```
pub mod prelude;

/// The contract model and its rendering.
///
/// See the module documentation for the classify, format and render pipeline.
pub mod contract;

/// ECMA-335 metadata parsing.
///
/// Only the parts needed to recover a module's public surface are implemented: the metadata
/// root and stream directory, the `#~` tables with their row readers, the `#Strings` and
/// `#Blob` heaps, and type signatures.
///
/// # Examples
///
/// ```rust,no_run
/// use dotcontract::CilModule;
/// use std::path::Path;
///
/// let module = CilModule::from_file(Path::new("Contoso.Shapes.dll"))?;
/// let tables = module.with_metadata(|metadata| metadata.tables.table_count());
/// println!("{tables} tables present");
/// # Ok::<(), dotcontract::Error>(())
/// ```
pub mod metadata;

/// Sources of type snapshots.
pub mod provider;

pub use error::{Error, Result};

/// Low-level file parsing utilities
pub use file::{parser::Parser, File};

/// The module loader used by [`CilMetadataProvider`].
pub use metadata::cilmodule::CilModule;

pub use contract::{
    classify, format, format_type_name, is_excluded, render, render_all, render_file,
    render_types, try_format, Category, ClassifiedResult, ClassifiedType, Decoration,
    MemberDefinition, MethodDefinition, ModuleTypes, Parameter, PropertyDefinition,
    TypeDefinition, TypeKind, TypeRef, BUILTIN_ALIASES, EXCLUDED_MEMBER_NAMES,
};

pub use provider::{
    CilMetadataProvider, CilModuleHandle, InMemoryProvider, LoaderConfig, MetadataProvider,
};
