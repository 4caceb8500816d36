//! `Property` table (0x17): properties, in runs owned by `PropertyMap` rows.
//!
//! Accessors are not stored here; they are linked through `MethodSemantics`.

mod reader;

use crate::metadata::token::Token;

/// A raw `Property` row.
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `PropertyAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}
