//! The header of the `#~` (or uncompressed `#-`) tables stream (ECMA-335 II.24.2.6).
//!
//! ```text
//! offset  size  field
//! 0       4     Reserved
//! 4       1     MajorVersion
//! 5       1     MinorVersion
//! 6       1     HeapSizes
//! 7       1     Reserved
//! 8       8     Valid      (bit n set = table n present)
//! 16      8     Sorted
//! 24      4*n   Rows       (one u32 per present table)
//! ...           Tables     (present tables back to back, in id order)
//! ```

use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at, read_le_at_dyn},
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Result,
};

/// `HeapSizes` bit signalling 4 extra bytes after the row counts.
const HEAP_EXTRA_DATA: u8 = 0x40;

/// Parsed tables stream header, with the location of every present table.
pub struct TablesHeader<'a> {
    /// Major version of the table schema
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Raw `HeapSizes` flags
    pub heap_sizes: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Index widths derived from the row counts
    pub info: TableInfoRef,
    data: &'a [u8],
    table_offsets: Vec<usize>,
}

impl<'a> TablesHeader<'a> {
    /// Parse the header at the start of `data` and locate every present table.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is truncated, or
    /// [`crate::Error::Malformed`] if it declares tables this reader does not know.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(out_of_bounds_error!());
        }

        let major_version = read_le::<u8>(&data[4..])?;
        let minor_version = read_le::<u8>(&data[5..])?;
        let heap_sizes = read_le::<u8>(&data[6..])?;
        let valid = read_le::<u64>(&data[8..])?;
        let sorted = read_le::<u64>(&data[16..])?;

        if valid == 0 {
            return Err(malformed_error!("Tables stream declares no tables"));
        }
        if valid >> TableId::COUNT != 0 {
            return Err(malformed_error!(
                "Tables stream declares unsupported tables - 0x{:016X}",
                valid
            ));
        }

        let mut offset = 24_usize;
        let mut row_counts = vec![0u32; TableId::COUNT];
        for table_id in TableId::iter() {
            if valid & (1u64 << table_id as u8) != 0 {
                row_counts[table_id as usize] = read_le_at::<u32>(data, &mut offset)?;
            }
        }

        if heap_sizes & HEAP_EXTRA_DATA != 0 {
            offset += 4;
        }

        let info = Arc::new(TableInfo::new(&row_counts, heap_sizes));

        let mut table_offsets = vec![0usize; TableId::COUNT];
        for table_id in TableId::iter() {
            table_offsets[table_id as usize] = offset;

            let table_size =
                u64::from(row_counts[table_id as usize]) * u64::from(info.row_size(table_id));
            let Some(end) = usize::try_from(table_size)
                .ok()
                .and_then(|size| offset.checked_add(size))
            else {
                return Err(out_of_bounds_error!());
            };
            if end > data.len() {
                return Err(out_of_bounds_error!());
            }

            offset = end;
        }

        Ok(TablesHeader {
            major_version,
            minor_version,
            heap_sizes,
            valid,
            sorted,
            info,
            data,
            table_offsets,
        })
    }

    /// Number of rows in `table_id`, 0 if the table is absent.
    #[must_use]
    pub fn row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Returns `true` if `table_id` is present with at least one row.
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.row_count(table_id) > 0
    }

    /// Number of present tables.
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Typed view over the table that `T` decodes, `None` if it has no rows.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let row_count = self.row_count(T::TABLE_ID);
        if row_count == 0 {
            return None;
        }

        let start = self.table_offsets[T::TABLE_ID as usize];
        MetadataTable::new(&self.data[start..], row_count, self.info.clone()).ok()
    }

    /// Map a logical row of `target` through its pointer table, if the stream has one.
    ///
    /// Uncompressed `#-` streams may reorder `Field`, `MethodDef`, `Param` and `Property` rows
    /// through `FieldPtr`, `MethodPtr`, `ParamPtr` and `PropertyPtr`. Without a pointer table the
    /// row is returned unchanged.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `row` is past the pointer table.
    pub fn resolve_indirection(&self, target: TableId, row: u32) -> Result<u32> {
        let pointer_table = match target {
            TableId::Field => TableId::FieldPtr,
            TableId::MethodDef => TableId::MethodPtr,
            TableId::Param => TableId::ParamPtr,
            TableId::Property => TableId::PropertyPtr,
            TableId::Event => TableId::EventPtr,
            _ => return Ok(row),
        };

        let pointer_rows = self.row_count(pointer_table);
        if pointer_rows == 0 {
            return Ok(row);
        }
        if row == 0 || row > pointer_rows {
            return Err(out_of_bounds_error!());
        }

        let row_size = self.info.row_size(pointer_table) as usize;
        let mut offset = self.table_offsets[pointer_table as usize] + (row as usize - 1) * row_size;
        read_le_at_dyn(self.data, &mut offset, self.info.is_large(target))
    }
}
