//! `MethodSemantics` table (0x18): links property and event accessors to their methods.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `MethodSemantics` row.
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `MethodSemanticsAttributes` bitmask (getter, setter, ...)
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// The owning property or event (`HasSemantics`)
    pub association: CodedIndex,
}
