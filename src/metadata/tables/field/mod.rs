//! `Field` table (0x04): fields of all types, in runs owned by `TypeDef` rows.

mod reader;

use crate::metadata::token::Token;

/// A raw `Field` row.
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `FieldAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}
