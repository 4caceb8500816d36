//! `TypeRef` table (0x01): types defined in other modules or assemblies.

mod reader;

use crate::metadata::{tables::CodedIndex, token::Token};

/// A raw `TypeRef` row.
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// Where the type lives (`ResolutionScope`); a `TypeRef` scope means a nested type
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}
