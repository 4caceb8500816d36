//! The metadata root (ECMA-335 II.24.2.1).
//!
//! ```text
//! offset  size  field
//! 0       4     Signature      0x424A5342 ("BSJB")
//! 4       2     MajorVersion
//! 6       2     MinorVersion
//! 8       4     Reserved
//! 12      4     Length         of the version string, padded to 4
//! 16      n     Version        null padded UTF-8
//! 16+n    2     Flags
//! 18+n    2     Streams        number of stream headers that follow
//! ```

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Result,
};

/// Magic value at the start of every metadata root.
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The parsed metadata root with its stream directory.
#[derive(Debug, Clone)]
pub struct Root {
    /// Always [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, usually 1
    pub major_version: u16,
    /// Minor version, usually 1
    pub minor_version: u16,
    /// Length of the version string field in bytes, including padding
    pub length: u32,
    /// Runtime version the module was built against, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// The stream directory
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parse the metadata root at the start of `data`.
    ///
    /// Stream offsets and sizes are validated against `data`, so the caller can slice every
    /// stream without further checks.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the signature does not match or the stream directory
    /// is invalid, and [`crate::Error::OutOfBounds`] if `data` is truncated.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(out_of_bounds_error!());
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - 0x{:08X}",
                signature
            ));
        }

        let length = read_le::<u32>(&data[12..])?;
        let Some(version_end) = (length as usize).checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                length
            ));
        };
        if version_end + 4 > data.len() {
            return Err(out_of_bounds_error!());
        }

        let version = String::from_utf8_lossy(&data[16..version_end])
            .trim_end_matches('\0')
            .to_string();

        let mut offset = version_end;
        let flags = read_le_at::<u16>(data, &mut offset)?;
        let stream_count = read_le_at::<u16>(data, &mut offset)?;
        if stream_count == 0 || stream_count as usize > super::streams::VALID_STREAM_NAMES.len() {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut stream_headers: Vec<StreamHeader> = Vec::with_capacity(stream_count as usize);
        for _ in 0..stream_count {
            if offset >= data.len() {
                return Err(out_of_bounds_error!());
            }

            let stream = StreamHeader::from(&data[offset..])?;
            let Some(stream_end) = stream.offset.checked_add(stream.size) else {
                return Err(malformed_error!(
                    "Stream offset and size cause integer overflow - {} + {}",
                    stream.offset,
                    stream.size
                ));
            };
            if stream_end as usize > data.len() {
                return Err(out_of_bounds_error!());
            }
            if stream_headers.iter().any(|seen| seen.name == stream.name) {
                return Err(malformed_error!("Duplicate stream - {}", stream.name));
            }

            offset += stream.header_size();
            stream_headers.push(stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            length,
            version,
            flags,
            stream_headers,
        })
    }

    /// Look up a stream header by name.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    fn crafted() -> Vec<u8> {
        let mut data = vec![
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00,
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
            b'v', b'4', b'.', b'0', b'.', b'3', b'0', b'3', b'1', b'9', 0x00, 0x00,
            0x00, 0x00,
            0x02, 0x00,

            0x40, 0x00, 0x00, 0x00, // #~
            0x04, 0x00, 0x00, 0x00,
            b'#', b'~', 0x00, 0x00,

            0x44, 0x00, 0x00, 0x00, // #Strings
            0x04, 0x00, 0x00, 0x00,
            b'#', b'S', b't', b'r', b'i', b'n', b'g', b's', 0x00, 0x00, 0x00, 0x00,
        ];
        data.resize(0x48, 0);
        data
    }

    #[test]
    fn crafted_root() {
        let root = Root::read(&crafted()).unwrap();

        assert_eq!(root.signature, CIL_HEADER_MAGIC);
        assert_eq!(root.major_version, 1);
        assert_eq!(root.length, 12);
        assert_eq!(root.version, "v4.0.30319");
        assert_eq!(root.stream_headers.len(), 2);
        assert_eq!(root.stream("#~").unwrap().offset, 0x40);
        assert_eq!(root.stream("#Strings").unwrap().offset, 0x44);
        assert!(root.stream("#Blob").is_none());
    }

    #[test]
    fn bad_signature() {
        let mut data = crafted();
        data[0] = 0x43;
        assert!(Root::read(&data).is_err());
    }

    #[test]
    fn stream_out_of_range() {
        let mut data = crafted();
        data.truncate(0x46);
        assert!(Root::read(&data).is_err());
    }

    #[test]
    fn duplicate_stream() {
        let mut data = crafted();
        data[52..64].copy_from_slice(b"#~\0\0\0\0\0\0\0\0\0\0");
        assert!(Root::read(&data).is_err());
    }
}
