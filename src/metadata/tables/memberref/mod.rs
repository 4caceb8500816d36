//! `MemberRef` table (0x0A): references to fields and methods of other types.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `MemberRef` row.
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// Owner of the referenced member (`MemberRefParent`)
    pub class: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}
