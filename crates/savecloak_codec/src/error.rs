//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while obfuscating or recovering a line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The unmasked bytes are not a valid radix-64 pass.
    #[error("invalid obfuscation layer: {message}")]
    InvalidLayer {
        /// Description of the failed layer.
        message: String,
    },

    /// The unmasked bytes are not valid UTF-8 between passes.
    #[error("invalid UTF-8 between obfuscation passes")]
    InvalidUtf8,

    /// The recovered bytes are malformed under the declared text encoding.
    #[error("malformed text under encoding {encoding}")]
    MalformedText {
        /// Label of the declared encoding.
        encoding: &'static str,
    },
}

impl CodecError {
    /// Create an invalid layer error.
    pub fn invalid_layer(message: impl Into<String>) -> Self {
        Self::InvalidLayer {
            message: message.into(),
        }
    }
}
