//! `Assembly` table (0x20): the manifest row, present only in the main module of an assembly.

mod reader;

use crate::metadata::token::Token;

/// A raw `Assembly` row.
#[derive(Clone, Debug)]
pub struct AssemblyRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token of this row
    pub token: Token,
    /// Byte offset of this row within the table
    pub offset: usize,
    /// `AssemblyHashAlgorithm`
    pub hash_alg_id: u32,
    /// Major version
    pub major_version: u32,
    /// Minor version
    pub minor_version: u32,
    /// Build number
    pub build_number: u32,
    /// Revision number
    pub revision_number: u32,
    /// `AssemblyFlags` bitmask
    pub flags: u32,
    /// `#Blob` index of the public key
    pub public_key: u32,
    /// `#Strings` index of the simple name
    pub name: u32,
    /// `#Strings` index of the culture
    pub culture: u32,
}
