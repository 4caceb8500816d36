//! `CustomAttribute` table (0x0C): attributes applied to metadata rows.
//!
//! The extractor only looks at these to find `ExtensionAttribute` on methods.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `CustomAttribute` row.
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// The row the attribute is applied to (`HasCustomAttribute`)
    pub parent: CodedIndex,
    /// The attribute constructor (`CustomAttributeType`)
    pub constructor: CodedIndex,
    /// `#Blob` index of the encoded constructor arguments
    pub value: u32,
}
