use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef, TypeSpecRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeSpecRaw {
    const TABLE_ID: TableId = TableId::TypeSpec;

    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(sizes.blob_bytes())
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeSpecRaw {
            rid,
            token: Token::new(0x1B00_0000 + rid),
            offset: *offset,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted() {
        let data = vec![0x0A, 0x00, 0x14, 0x00];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::TypeSpec, 2)], false, false, false));
        let table = MetadataTable::<TypeSpecRaw>::new(&data, 2, sizes).unwrap();

        let signatures: Vec<u32> = table.iter().map(|row| row.signature).collect();
        assert_eq!(signatures, vec![0x0A, 0x14]);
        assert_eq!(table.get(2).unwrap().token.value(), 0x1B00_0002);
        assert!(MetadataTable::<TypeSpecRaw>::new(&data, 3, table_sizes()).is_err());
    }

    fn table_sizes() -> TableInfoRef {
        Arc::new(TableInfo::new_test(&[(TableId::TypeSpec, 3)], false, false, false))
    }
}
