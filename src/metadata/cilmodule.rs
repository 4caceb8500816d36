//! A loaded .NET module: the PE file together with its parsed metadata streams.

use std::{path::Path, sync::Arc};

use log::debug;
use ouroboros::self_referencing;

use crate::{
    file::File,
    metadata::{cor20header::Cor20Header, view::MetadataView},
    Result,
};

struct CilModuleData<'a> {
    cor20header: Cor20Header,
    metadata: MetadataView<'a>,
}

impl<'a> CilModuleData<'a> {
    fn from_file(file: &'a File) -> Result<Self> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

        let metadata_offset = file.rva_to_offset(cor20header.meta_data_rva as usize)?;
        let metadata_slice =
            file.data_slice(metadata_offset, cor20header.meta_data_size as usize)?;
        let metadata = MetadataView::parse(metadata_slice)?;

        debug!(
            "metadata {} with {} streams and {} tables",
            metadata.root.version,
            metadata.root.stream_headers.len(),
            metadata.tables.table_count()
        );

        Ok(CilModuleData {
            cor20header,
            metadata,
        })
    }
}

#[self_referencing]
/// A .NET module whose metadata has been located and parsed.
///
/// The module owns its bytes (a buffer or a memory map) and borrows every stream from them, so
/// nothing is copied out of the image until types are extracted.
pub struct CilModule {
    file: Arc<File>,
    #[borrows(file)]
    #[not_covariant]
    data: CilModuleData<'this>,
}

impl CilModule {
    /// Load and parse a module from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a PE image with a CLI header, or its
    /// metadata is malformed.
    pub fn from_file(path: &Path) -> Result<CilModule> {
        Self::load(Arc::new(File::from_file(path)?))
    }

    /// Load and parse a module held in memory.
    ///
    /// # Errors
    /// Same as [`CilModule::from_file`], minus I/O.
    pub fn from_mem(data: Vec<u8>) -> Result<CilModule> {
        Self::load(Arc::new(File::from_mem(data)?))
    }

    fn load(file: Arc<File>) -> Result<CilModule> {
        CilModule::try_new(file, |file| CilModuleData::from_file(file))
    }

    /// The CLI header.
    #[must_use]
    pub fn cor20header(&self) -> &Cor20Header {
        self.with_data(|data| &data.cor20header)
    }

    /// Run `f` with the parsed metadata.
    pub fn with_metadata<R>(&self, f: impl FnOnce(&MetadataView<'_>) -> R) -> R {
        self.with_data(|data| f(&data.metadata))
    }

    /// The underlying PE file.
    #[must_use]
    pub fn file(&self) -> &Arc<File> {
        self.borrow_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{pe_image, MetadataBuilder};

    #[test]
    fn load_from_memory() {
        let mut builder = MetadataBuilder::new();
        builder.module("Shapes.dll");
        let image = pe_image(&builder.build());

        let module = CilModule::from_mem(image).unwrap();
        assert_eq!(module.cor20header().cb, 72);
        assert_eq!(module.file().section_count(), 1);

        let name = module.with_metadata(|metadata| {
            let row = metadata
                .tables
                .table::<crate::metadata::tables::ModuleRaw>()
                .unwrap()
                .get(1)
                .unwrap();
            metadata.string(row.name).unwrap().to_string()
        });
        assert_eq!(name, "Shapes.dll");
    }

    #[test]
    fn load_from_disk() {
        let image = pe_image(&MetadataBuilder::new().build());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &image).unwrap();

        let module = CilModule::from_file(file.path()).unwrap();
        assert!(module.with_metadata(|metadata| metadata.blobs.is_some()));
    }

    #[test]
    fn reject_broken_metadata() {
        let mut metadata = MetadataBuilder::new().build();
        metadata[0] = b'X';
        assert!(CilModule::from_mem(pe_image(&metadata)).is_err());

        let metadata = MetadataBuilder::new().build_without("#~");
        assert!(CilModule::from_mem(pe_image(&metadata)).is_err());

        assert!(CilModule::from_mem(vec![0x4D, 0x5A, 0x00]).is_err());
        assert!(CilModule::from_mem(Vec::new()).is_err());
    }
}
