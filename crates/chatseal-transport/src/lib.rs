//! # chatseal Transport
//!
//! The collaborators the crypto layer talks to, as async traits.
//!
//! ## Overview
//!
//! The crypto layer produces and consumes envelopes but never moves them.
//! This crate defines the three services that do:
//!
//! - [`Transport`] - Delivers sealed envelopes between named parties
//! - [`KeyDirectory`] - Returns a recipient's public key text by username
//! - [`KeyVault`] - Keeps the holder's private key text between sessions
//!
//! Each has an in-memory implementation for tests and loopback use.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatseal_core::Username;
//! use chatseal_transport::{MemoryRelay, OutgoingMessage, Transport};
//!
//! async fn example() {
//!     let relay = MemoryRelay::new();
//!     let alice = relay.connect(Username::new("alice").unwrap()).await;
//!     let bob = relay.connect(Username::new("bob").unwrap()).await;
//!
//!     // let envelope = chatseal_crypto::encrypt("hi", &bob_public).unwrap();
//!     // alice.send(OutgoingMessage::new(bob.local_user().clone(), envelope)).await?;
//!     // let delivered = bob.recv().await?;
//! }
//! ```
//!
//! ## Message Flow
//!
//! ```text
//! Alice                 Directory / Relay                  Bob
//!   |--- lookup(bob) ------>|                               |
//!   |<-- public key text ---|                               |
//!   |--- send(envelope) --->|                               |
//!   |                       |--- deliver(envelope, alice) ->|
//! ```

pub mod directory;
pub mod error;
pub mod messages;
pub mod transport;
pub mod vault;

pub use directory::{KeyDirectory, MemoryDirectory};
pub use error::{Result, TransportError};
pub use messages::{limits, DeliveredMessage, OutgoingMessage};
pub use transport::{memory::MemoryRelay, memory::MemoryTransport, Transport};
pub use vault::{KeyVault, MemoryVault};
