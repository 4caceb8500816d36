//! `Module` table (0x00): the single row describing this module.

mod reader;

use crate::metadata::token::Token;

/// A raw `Module` row.
#[derive(Clone, Debug)]
pub struct ModuleRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// Reserved, always zero
    pub generation: u32,
    /// `#Strings` index of the module file name
    pub name: u32,
    /// `#GUID` index of the module version id
    pub mvid: u32,
    /// `#GUID` index, reserved
    pub encid: u32,
    /// `#GUID` index, reserved
    pub encbaseid: u32,
}
