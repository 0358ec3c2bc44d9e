//! Error types for chatseal Core.

use thiserror::Error;

/// Errors that can occur while converting between bytes and text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input is not decodable base64, even after normalization.
    #[error("decoding error: {0}")]
    Decode(String),

    /// Input is not a recognised armored key block.
    #[error("format error: {0}")]
    Format(String),

    /// An identifier was empty or otherwise unusable.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
