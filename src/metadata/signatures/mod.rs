//! Signature blob decoding (ECMA-335 II.23.2).
//!
//! Every method, property, field and type-spec row points into the `#Blob` heap at a compact
//! binary encoding of its types. The decoder turns those into [`TypeSignature`] trees whose
//! `CLASS`/`VALUETYPE` tokens are later resolved against `TypeDef`, `TypeRef` and `TypeSpec`.
//!
//! # Examples
//!
//! ```rust
//! use dotcontract::metadata::signatures::{parse_method_signature, TypeSignature};
//!
//! // instance string ToString(int32)
//! let signature = parse_method_signature(&[0x20, 0x01, 0x0E, 0x08])?;
//! assert!(signature.has_this);
//! assert_eq!(signature.return_type.base, TypeSignature::String);
//! # Ok::<(), dotcontract::Error>(())
//! ```

mod parser;
mod types;

pub use parser::{SignatureParser, MAX_RECURSION_DEPTH};
pub use types::*;

use crate::Result;

/// Decode a method signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_method_signature`].
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    SignatureParser::new(data).parse_method_signature()
}

/// Decode a property signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_property_signature`].
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    SignatureParser::new(data).parse_property_signature()
}

/// Decode a field signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_field_signature`].
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    SignatureParser::new(data).parse_field_signature()
}

/// Decode a type-spec signature blob.
///
/// # Errors
/// See [`SignatureParser::parse_type_spec_signature`].
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    SignatureParser::new(data).parse_type_spec_signature()
}
