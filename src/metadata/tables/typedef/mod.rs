//! `TypeDef` table (0x02): one row per type defined in the module.
//!
//! Fields and methods of a type are not listed per row. Each row only stores the first index of
//! its run in the `Field` and `MethodDef` tables; the run ends where the next row's run begins.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `TypeDef` row, with heap indexes left unresolved.
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `TypeAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type (`TypeDefOrRef`), null for interfaces and `System.Object`
    pub extends: CodedIndex,
    /// First row of this type's run in the `Field` table
    pub field_list: u32,
    /// First row of this type's run in the `MethodDef` table
    pub method_list: u32,
}
