//! `Param` table (0x08): parameter names, in runs owned by `MethodDef` rows.
//!
//! Sequence 0 describes the return value; declared parameters start at 1.

mod reader;

use crate::metadata::token::Token;

/// A raw `Param` row.
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `ParamAttributes` bitmask
    pub flags: u32,
    /// Position of the parameter, 0 for the return value
    pub sequence: u32,
    /// `#Strings` index of the name
    pub name: u32,
}
