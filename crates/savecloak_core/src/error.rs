//! Error types for SaveCloak core operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for save-file operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while writing, reading or scanning save files.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Line codec error.
    #[error("codec error: {0}")]
    Codec(#[from] savecloak_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The target save file does not exist.
    #[error("save file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file header cannot be interpreted.
    #[error("invalid save header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },

    /// The caller seed cannot drive the requested version policy.
    #[error("invalid seed: {message}")]
    InvalidSeed {
        /// Description of the seed problem.
        message: String,
    },

    /// A scan pattern carries no seed placeholder.
    #[error("scan pattern must contain at least one '*' placeholder")]
    InvalidScanPattern,
}

impl SaveError {
    /// Creates a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Creates an invalid seed error.
    pub fn invalid_seed(message: impl Into<String>) -> Self {
        Self::InvalidSeed {
            message: message.into(),
        }
    }

    /// Whether this error marks a corrupt file rather than a failed call.
    ///
    /// Batch scanners substitute an absence marker for these instead of
    /// aborting the whole scan.
    #[must_use]
    pub fn is_corrupt_file(&self) -> bool {
        matches!(self, Self::Codec(_) | Self::InvalidHeader { .. })
    }
}
