use std::path::PathBuf;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors fall into two groups. Everything that prevents a module from being opened or its
/// metadata from being read at all is a load failure (see [`Error::is_load_failure`]) and aborts
/// the extraction. [`Error::MemberFormat`] is the only recoverable kind: the renderer drops the
/// affected member and keeps going.
///
/// # Error Categories
///
/// ## File Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond buffer boundaries
/// - [`Error::NotSupported`] - Unsupported file format or feature
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::RecursionLimit`] - Signature nesting exceeded the configured depth
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from the goblin crate
///
/// ## Provider Errors
/// - [`Error::ModuleLoad`] - A module could not be opened by a provider
/// - [`Error::ModuleNotFound`] - A provider has no module registered under a path
///
/// ## Rendering Errors
/// - [`Error::MemberFormat`] - A member signature references a type that was never resolved
///
/// # Examples
///
/// ```rust,no_run
/// use dotcontract::{render_file, CilMetadataProvider, Error};
/// use std::path::Path;
///
/// match render_file(Path::new("Library.dll"), &CilMetadataProvider::new()) {
///     Ok(contract) => println!("{contract}"),
///     Err(Error::ModuleLoad { path, source }) => {
///         eprintln!("{} could not be loaded: {}", path.display(), source);
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// This file type is not supported.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Recursion limit reached while decoding a nested signature.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// A provider failed to open the module at `path`.
    #[error("Failed to load module {} - {source}", .path.display())]
    ModuleLoad {
        /// Path that was handed to the provider
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// A provider has no module registered under the given path.
    #[error("No module registered for {}", .0.display())]
    ModuleNotFound(PathBuf),

    /// A member signature could not be formatted.
    ///
    /// Raised by [`crate::contract::try_format`] when a type reference is unresolved; the
    /// renderer skips the member instead of propagating this.
    #[error("Member signature could not be formatted - {0}")]
    MemberFormat(String),
}

impl Error {
    /// Returns `true` if this error means the module itself could not be read.
    ///
    /// Every variant except [`Error::MemberFormat`] is fatal for an extraction.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Error::MemberFormat(_))
    }
}

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_carries_location() {
        let error = malformed_error!("bad row - {}", 7);
        match &error {
            Error::Malformed { message, file, .. } => {
                assert_eq!(message, "bad row - 7");
                assert!(file.ends_with("error.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.is_load_failure());
    }

    #[test]
    fn member_format_is_recoverable() {
        assert!(!Error::MemberFormat("List`1".to_string()).is_load_failure());
        assert!(Error::ModuleNotFound(PathBuf::from("a.dll")).is_load_failure());
    }

    #[test]
    fn module_load_display() {
        let error = Error::ModuleLoad {
            path: PathBuf::from("Foo.dll"),
            source: Box::new(Error::Empty),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load module Foo.dll - Provided input was empty"
        );
    }
}
