use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while editing a document
#[derive(Debug)]
pub enum LinedError {
    /// Delete or edit requested on a document with no lines
    EmptyDocument,
    /// Line number outside `1..=count`
    InvalidPosition { position: usize, count: usize },
    /// Line number token that is not a positive integer
    InvalidNumber(String),
    /// Unrecognized menu token
    InvalidOption(String),
    /// Growing the line storage failed
    AllocationFailure(TryReserveError),
    /// The file exists but could not be read
    Load { path: PathBuf, source: io::Error },
    /// The file could not be opened or written
    Save { path: PathBuf, source: io::Error },
    /// Save requested on a document that was never associated with a path
    NoFile,
    Io(io::Error),
}

impl LinedError {
    /// Whether the session must end after this error.
    ///
    /// Only a failed load is terminal: a document that did not load
    /// completely is not safe to edit or to write back.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LinedError::Load { .. })
    }
}

impl fmt::Display for LinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinedError::EmptyDocument => {
                write!(f, "There are no text lines in the file, use append")
            }
            LinedError::InvalidPosition { .. } => write!(f, "Invalid line number"),
            LinedError::InvalidNumber(_) => write!(f, "Invalid line number"),
            LinedError::InvalidOption(token) => write!(f, "Invalid option: {}", token),
            LinedError::AllocationFailure(e) => write!(f, "Out of memory: {}", e),
            LinedError::Load { path, source } => {
                write!(f, "Error loading {}: {}", path.display(), source)
            }
            LinedError::Save { path, source } => {
                write!(f, "Error saving {}: {}", path.display(), source)
            }
            LinedError::NoFile => write!(f, "No file name"),
            LinedError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for LinedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinedError::AllocationFailure(e) => Some(e),
            LinedError::Load { source, .. } | LinedError::Save { source, .. } => Some(source),
            LinedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LinedError {
    fn from(e: io::Error) -> Self {
        LinedError::Io(e)
    }
}

impl From<TryReserveError> for LinedError {
    fn from(e: TryReserveError) -> Self {
        LinedError::AllocationFailure(e)
    }
}

pub type Result<T> = std::result::Result<T, LinedError>;
