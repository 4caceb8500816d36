//! `TypeSpec` table (0x1B): constructed types such as generic instantiations and arrays.

mod reader;

use crate::metadata::token::Token;

/// A raw `TypeSpec` row.
#[derive(Clone, Debug)]
pub struct TypeSpecRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `#Blob` index of the type signature
    pub signature: u32,
}
