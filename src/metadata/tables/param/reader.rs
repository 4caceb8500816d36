use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{ParamRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for ParamRaw {
    const TABLE_ID: TableId = TableId::Param;

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* flags */     2 +
            /* sequence */  2 +
            /* name */      sizes.str_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ParamRaw {
            rid,
            token: Token::new(0x0800_0000 + rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            sequence: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x00, 0x00, // flags
            0x01, 0x00, // sequence
            0x55, 0x00, // name
            0x00, 0x00, // flags
            0x02, 0x00, // sequence
            0x5A, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Param, 2)], false, false, false));
        let table = MetadataTable::<ParamRaw>::new(&data, 2, sizes).unwrap();

        let sequences: Vec<u32> = table.iter().map(|row| row.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);

        let row = table.get(2).unwrap();
        assert_eq!(row.token.value(), 0x0800_0002);
        assert_eq!(row.name, 0x5A);
    }
}
