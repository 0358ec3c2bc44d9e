//! # chatseal
//!
//! End-to-end encrypted messaging over an untrusted relay.
//!
//! ## Overview
//!
//! Each message is sealed with a fresh AES-256-GCM key, and that key is
//! wrapped under the recipient's RSA-OAEP public key. The relay only ever
//! sees base64 envelopes and usernames.
//!
//! - **Keys**: generated per user at registration; the public half goes to
//!   a directory, the private half to a local vault
//! - **Envelopes**: wrapped session key, nonce and ciphertext
//! - **Transport**: any channel that can route envelopes by username
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatseal::{Messenger, MessengerConfig};
//! use chatseal::core::Username;
//! use chatseal::transport::{MemoryDirectory, MemoryRelay, MemoryVault};
//! use std::sync::Arc;
//!
//! async fn example() -> chatseal::Result<()> {
//!     let relay = MemoryRelay::new();
//!     let directory = Arc::new(MemoryDirectory::new());
//!     let vault = MemoryVault::new();
//!
//!     let alice = relay.connect(Username::new("alice").unwrap()).await;
//!     let bob = relay.connect(Username::new("bob").unwrap()).await;
//!
//!     let alice = Messenger::register(alice, directory.clone(), &vault, MessengerConfig::default()).await?;
//!     let bob = Messenger::register(bob, directory.clone(), &vault, MessengerConfig::default()).await?;
//!
//!     alice.send_text(bob.username(), "hello").await?;
//!     let received = bob.recv().await?;
//!     assert_eq!(received.text, "hello");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `chatseal::core` - Codec and identifiers
//! - `chatseal::crypto` - Keys and the hybrid cipher
//! - `chatseal::transport` - Transport, directory and vault traits

pub mod error;
pub mod messenger;

// Re-export component crates
pub use chatseal_core as core;
pub use chatseal_crypto as crypto;
pub use chatseal_transport as transport;

// Re-export main types for convenience
pub use error::{ChatError, Result};
pub use messenger::{Messenger, MessengerConfig, ReceivedText};

// Re-export commonly used types
pub use chatseal_core::{MessageId, Username};
pub use chatseal_crypto::{
    decrypt, encrypt, export_public_key, generate_key_pair, import_private_key,
    import_public_key, CryptoError, DecryptionKey, EncryptedEnvelope, EncryptionKey, KeyPair,
};
pub use chatseal_transport::{DeliveredMessage, KeyDirectory, KeyVault, Transport};
