//! `GenericParam` table (0x2A): generic parameters of types and methods.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `GenericParam` row.
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// 0-based position in the owner's parameter list
    pub number: u32,
    /// `GenericParamAttributes` bitmask
    pub flags: u32,
    /// Owning type or method (`TypeOrMethodDef`)
    pub owner: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
}
