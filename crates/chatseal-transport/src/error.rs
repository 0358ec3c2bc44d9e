//! Error types for the transport module.

use chatseal_core::Username;
use thiserror::Error;

/// Errors that can occur while talking to the collaborators.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No party with this username is known.
    #[error("unknown user: {0}")]
    UnknownUser(Username),

    /// No private key is stored for this username.
    #[error("no stored key for user: {0}")]
    KeyNotFound(Username),

    /// Message validation failed.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The peer or channel went away.
    #[error("disconnected: {0}")]
    Disconnected(String),

    /// Wire serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
