use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    metadata::tables::types::{CodedIndexType, Column, TableId},
    Result,
};

/// Row count of a single table, with the derived index width.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Number of bits needed to address every row
    pub bits: u8,
    /// Whether simple indexes into this table are 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Derive index widths from a row count.
    #[must_use]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Sizing information for a tables stream: row counts, heap index widths and coded index widths.
///
/// Column widths in ECMA-335 metadata depend on the size of the heaps and tables they point into,
/// so every row reader needs this to know how many bytes to consume.
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`].
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Build sizing information from per-table row counts (indexed by [`TableId`]) and the
    /// `HeapSizes` byte of the tables header.
    #[must_use]
    pub fn new(row_counts: &[u32], heap_size_flags: u8) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & 0x01 == 0x01,
            is_large_index_guid: heap_size_flags & 0x02 == 0x02,
            is_large_index_blob: heap_size_flags & 0x04 == 0x04,
        };

        for (slot, rows) in table_info.rows.iter_mut().zip(row_counts) {
            *slot = TableRowInfo::new(*rows);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Sizing information for hand-crafted table data in tests.
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut row_counts = vec![0u32; TableId::COUNT];
        for (table_id, rows) in valid_tables {
            row_counts[*table_id as usize] = *rows;
        }

        let mut heap_size_flags = 0;
        if large_str {
            heap_size_flags |= 0x01;
        }
        if large_guid {
            heap_size_flags |= 0x02;
        }
        if large_blob {
            heap_size_flags |= 0x04;
        }

        TableInfo::new(&row_counts, heap_size_flags)
    }

    /// Split a raw coded index value into table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the tag does not name a table of this kind.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1u32 << tag_bits) - 1;

        let tag = (value & tag_mask) as usize;
        let index = value >> tag_bits;

        match tables.get(tag) {
            Some(table) => Ok((*table, index)),
            None => Err(out_of_bounds_error!()),
        }
    }

    /// Returns `true` if simple indexes into `id` are 4 bytes wide.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Returns `true` if `#Strings` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Returns `true` if `#GUID` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// Returns `true` if `#Blob` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index in bytes.
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index in bytes.
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index in bytes.
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Row information of `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Width of a simple index into `table_id` in bytes.
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].bits > 16 {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of the given kind in bytes.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Width of a column in bytes.
    #[must_use]
    pub fn column_bytes(&self, column: Column) -> u8 {
        match column {
            Column::Fixed(width) => width,
            Column::Str => self.str_bytes(),
            Column::Guid => self.guid_bytes(),
            Column::Blob => self.blob_bytes(),
            Column::Index(table_id) => self.table_index_bytes(table_id),
            Column::Coded(coded_index_type) => self.coded_index_bytes(coded_index_type),
        }
    }

    /// Size of one row of `table_id` in bytes.
    #[must_use]
    pub fn row_size(&self, table_id: TableId) -> u32 {
        table_id
            .columns()
            .iter()
            .map(|column| u32::from(self.column_bytes(*column)))
            .sum()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}
