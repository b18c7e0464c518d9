//! Error kinds for the find-and-replace workflow
//!
//! `InvalidPattern` stops the run before any file is read, and a broken
//! terminal stops it wherever it happens. Every other kind is caught at the
//! per-file boundary, printed, and counted as "not modified".

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplaceError {
    /// The find-pattern (or a group reference in the replacement) is invalid.
    #[error("Invalid regular expression pattern '{pattern}' - {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        suggestion: Option<String>,
    },

    /// The file-name glob cannot be parsed.
    #[error("Invalid file name pattern '{pattern}' - {message}")]
    InvalidGlob { pattern: String, message: String },

    /// The base directory does not exist.
    #[error("Directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The file is not valid UTF-8 text.
    #[error("Cannot read file '{}' - not a text file or encoding issue", .0.display())]
    Decode(PathBuf),

    /// The file cannot be read or written by the current user.
    #[error("Permission denied accessing file '{}'", .0.display())]
    Permission(PathBuf),

    /// Any other I/O failure while handling a file.
    #[error("Failed to process file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the user's answer or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Console(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ReplaceError>;

impl ReplaceError {
    /// Classify an I/O error raised while reading or writing `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if is_permission_denied(&err) {
            ReplaceError::Permission(path.to_path_buf())
        } else if err.kind() == io::ErrorKind::InvalidData {
            // read_to_string reports bad UTF-8 as InvalidData
            ReplaceError::Decode(path.to_path_buf())
        } else {
            ReplaceError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    /// Whether this error aborts the run before any file is touched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReplaceError::InvalidPattern { .. } | ReplaceError::Console(_))
    }
}

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}
