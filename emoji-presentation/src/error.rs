use std::error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Represents any kind of error that can occur while loading range tables.
///
/// None of the classification or normalization routines return errors. Only
/// decoding tables from their binary representation can fail, and it does so
/// once, at load time.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) path: Option<PathBuf>,
}

/// The kind of error that occurred while loading a range table.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error.
    Io(io::Error),
    /// The encoded table has a length, in bytes, that is not a multiple of 8.
    InvalidLength(usize),
    /// The range at the given index is empty (its start exceeds its end) or
    /// extends past the largest Unicode codepoint.
    InvalidRange {
        /// The index of the offending range.
        index: usize,
        /// The first codepoint of the range.
        start: u32,
        /// The last codepoint of the range.
        end: u32,
    },
    /// The range at the given index does not start strictly after the end of
    /// the preceding range plus one. That is, the two ranges are out of
    /// order, overlap or are adjacent and should have been merged.
    Unordered {
        /// The index of the offending range.
        index: usize,
    },
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error { kind, path: None }
    }

    pub(crate) fn with_path<P: AsRef<Path>>(mut self, path: P) -> Error {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Return the specific kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the file path associated with this error, if one exists.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref().map(|p| &**p)
    }

    /// Unwrap this error into its underlying kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Returns true if and only if this is an I/O error.
    pub fn is_io_error(&self) -> bool {
        match self.kind {
            ErrorKind::Io(_) => true,
            _ => false,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err))
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: ", path.display())?;
        }
        match self.kind {
            ErrorKind::Io(ref err) => write!(f, "{}", err),
            ErrorKind::InvalidLength(len) => write!(
                f,
                "range table has length {}, which is not a multiple of 8",
                len
            ),
            ErrorKind::InvalidRange { index, start, end } => write!(
                f,
                "range {} ({:04X}..{:04X}) is not a valid codepoint range",
                index, start, end
            ),
            ErrorKind::Unordered { index } => write!(
                f,
                "range {} overlaps, touches or precedes the previous range",
                index
            ),
        }
    }
}
