use std::error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An error that occurred while reading or parsing an emoji data file.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) line: Option<u64>,
    pub(crate) path: Option<PathBuf>,
}

/// The kind of error that occurred while reading an emoji data file.
#[derive(Debug)]
pub enum ErrorKind {
    /// The file could not be opened or read.
    Io(io::Error),
    /// A line did not have the expected shape.
    Parse(String),
}

impl Error {
    pub(crate) fn parse(msg: String) -> Error {
        Error { kind: ErrorKind::Parse(msg), line: None, path: None }
    }

    pub(crate) fn io(err: io::Error, path: Option<PathBuf>) -> Error {
        Error { kind: ErrorKind::Io(err), line: None, path }
    }

    /// Return the specific kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Return the 1-based line number at which this error occurred, if known.
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Return the path of the file being read, if known.
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
            ErrorKind::Parse(_) => false,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ErrorKind::Io(ref err) => Some(err),
            ErrorKind::Parse(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => {
                write!(f, "{}:{}: ", path.display(), line)?
            }
            (Some(path), None) => write!(f, "{}: ", path.display())?,
            (None, Some(line)) => write!(f, "error on line {}: ", line)?,
            (None, None) => {}
        }
        match self.kind {
            ErrorKind::Io(ref err) => write!(f, "{}", err),
            ErrorKind::Parse(ref msg) => write!(f, "{}", msg),
        }
    }
}
