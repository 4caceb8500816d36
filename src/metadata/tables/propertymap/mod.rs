//! `PropertyMap` table (0x15): links a `TypeDef` to the start of its run in `Property`.

mod reader;

use crate::metadata::token::Token;

/// A raw `PropertyMap` row.
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First row of the owner's run in the `Property` table
    pub property_list: u32,
}
