//! Parsed metadata streams of one module, borrowed from the metadata bytes.

use crate::{
    metadata::{
        root::Root,
        streams::{Blob, Strings, TablesHeader},
    },
    Result,
};

/// The metadata root and the streams the extractor reads.
///
/// `#~` (or `#-`) and `#Strings` are required; a module without them has no type definitions
/// to describe. `#Blob` may be missing in degenerate images, in which case every signature
/// lookup fails and affected members are dropped later.
pub struct MetadataView<'a> {
    /// The metadata root with its stream directory
    pub root: Root,
    /// The tables stream
    pub tables: TablesHeader<'a>,
    /// The identifier heap
    pub strings: Strings<'a>,
    /// The signature heap, if present
    pub blobs: Option<Blob<'a>>,
}

impl<'a> MetadataView<'a> {
    /// Parse the metadata starting at the root signature.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the root is invalid or a required stream is
    /// missing, and [`crate::Error::OutOfBounds`] if a stream is truncated.
    pub fn parse(data: &'a [u8]) -> Result<MetadataView<'a>> {
        let root = Root::read(data)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;

        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let stream_data = &data[start..start + stream.size as usize];

            match stream.name.as_str() {
                "#~" | "#-" => tables = Some(TablesHeader::from(stream_data)?),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                _ => {}
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Metadata has no tables stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Metadata has no #Strings heap"));
        };

        Ok(MetadataView {
            root,
            tables,
            strings,
            blobs,
        })
    }

    /// Look up a string heap entry.
    ///
    /// # Errors
    /// See [`Strings::get`].
    pub fn string(&self, index: u32) -> Result<&'a str> {
        self.strings.get(index as usize)
    }

    /// Look up a blob heap entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the module has no `#Blob` heap, otherwise see
    /// [`Blob::get`].
    pub fn blob(&self, index: u32) -> Result<&'a [u8]> {
        match &self.blobs {
            Some(blobs) => blobs.get(index as usize),
            None => Err(malformed_error!("Metadata has no #Blob heap")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tables::{TableId, TypeDefRaw},
        test::MetadataBuilder,
    };

    #[test]
    fn parse_built_metadata() {
        let mut builder = MetadataBuilder::new();
        builder.module("Shapes.dll");
        builder.type_def(0x0000_0001, "Circle", "Contoso.Shapes", None);
        let data = builder.build();

        let view = MetadataView::parse(&data).unwrap();
        assert_eq!(view.root.version, "v4.0.30319");
        assert_eq!(view.tables.row_count(TableId::Module), 1);

        let types = view.tables.table::<TypeDefRaw>().unwrap();
        let circle = types.get(2).unwrap();
        assert_eq!(view.string(circle.type_name).unwrap(), "Circle");
        assert_eq!(view.string(circle.type_namespace).unwrap(), "Contoso.Shapes");
        assert!(view.blob(0).unwrap().is_empty());
    }

    #[test]
    fn missing_streams() {
        let data = MetadataBuilder::new().build_without("#~");
        assert!(MetadataView::parse(&data).is_err());

        let data = MetadataBuilder::new().build_without("#Strings");
        assert!(MetadataView::parse(&data).is_err());

        let data = MetadataBuilder::new().build_without("#Blob");
        let view = MetadataView::parse(&data).unwrap();
        assert!(view.blob(0).is_err());
    }
}
