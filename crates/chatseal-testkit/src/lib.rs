//! # chatseal Testkit
//!
//! Testing utilities for chatseal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Codec and envelope wire inputs every peer must accept
//! - **Generators**: Proptest strategies for plaintexts and tampering
//! - **Fixtures**: Cached seeded key pairs and an in-memory network
//!
//! ## Golden Vectors
//!
//! ```rust
//! use chatseal_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use chatseal_testkit::fixtures::bob_keys;
//! use chatseal_testkit::generators::plaintext;
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(text in plaintext(256)) {
//!         let envelope = chatseal_crypto::encrypt(&text, bob_keys().public_key()).unwrap();
//!         let opened = chatseal_crypto::decrypt(&envelope, bob_keys().private_key()).unwrap();
//!         prop_assert_eq!(opened, text);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use chatseal_testkit::fixtures::{alice_keys, TestNetwork};
//!
//! let network = TestNetwork::new();
//! let alice = network.join_with_keys("alice", alice_keys()).await;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{alice_keys, bob_keys, mallory_keys, seeded_key_pair, username, TestNetwork};
pub use generators::{flip_bit, plaintext, tamper, EnvelopeField};
pub use vectors::{codec_vectors, envelope_vectors, verify_all_vectors, CodecVector, EnvelopeVector};
