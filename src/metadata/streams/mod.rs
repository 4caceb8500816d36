//! Metadata streams.
//!
//! The metadata root is followed by a directory of named streams. The extractor reads three of
//! them:
//!
//! - `#~` / `#-` - the tables stream, see [`TablesHeader`]
//! - `#Strings` - identifiers, see [`Strings`]
//! - `#Blob` - signatures, see [`Blob`]
//!
//! `#US` and `#GUID` are recognised in the stream directory but never decoded.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::{StreamHeader, VALID_STREAM_NAMES};
pub use strings::Strings;
pub use tablesheader::TablesHeader;
