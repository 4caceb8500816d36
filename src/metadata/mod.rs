//! ECMA-335 metadata reading.
//!
//! Everything between the CLI header of a PE image and the rows of its metadata tables:
//!
//! - [`cor20header`] - the CLI header that locates the metadata
//! - [`root`] - the metadata root and its stream directory
//! - [`streams`] - the `#~`, `#Strings` and `#Blob` streams
//! - [`tables`] - row schemas, index sizing and typed row readers
//! - [`signatures`] - decoding of signature blobs
//! - [`flags`] - attribute bitmasks of types, methods, fields and signatures
//! - [`view`] / [`cilmodule`] - a parsed module, from bytes or from a PE image
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotcontract::metadata::{cilmodule::CilModule, tables::TableId};
//! use std::path::Path;
//!
//! let module = CilModule::from_file(Path::new("Library.dll"))?;
//! let types = module.with_metadata(|metadata| metadata.tables.row_count(TableId::TypeDef));
//! println!("{types} type definitions");
//! # Ok::<(), dotcontract::Error>(())
//! ```

pub mod cilmodule;
pub mod cor20header;
pub mod flags;
pub mod root;
pub mod signatures;
pub mod streams;
pub mod tables;
pub mod token;
pub mod view;
