//! Error types for the messenger.

use chatseal_core::Username;
use chatseal_crypto::CryptoError;
use chatseal_transport::TransportError;
use thiserror::Error;

/// Errors that can occur during messenger operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Key handling or encryption error.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Delivery, directory or vault error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A blocking crypto task panicked or was cancelled.
    #[error("crypto task failed: {0}")]
    TaskFailed(String),

    /// The message is addressed to someone else.
    #[error("message is addressed to {0}")]
    Misaddressed(Username),
}

impl ChatError {
    /// Whether this is the uniform "could not be decrypted" failure.
    pub fn is_undecryptable(&self) -> bool {
        matches!(self, ChatError::Crypto(e) if e.is_undecryptable())
    }
}

/// Result type for messenger operations.
pub type Result<T> = std::result::Result<T, ChatError>;
