//! `NestedClass` table (0x29): maps nested `TypeDef` rows to their enclosing type.

mod reader;

use crate::metadata::token::Token;

/// A raw `NestedClass` row.
#[derive(Clone, Debug)]
pub struct NestedClassRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `TypeDef` row of the nested type
    pub nested_class: u32,
    /// `TypeDef` row of the enclosing type
    pub enclosing_class: u32,
}
