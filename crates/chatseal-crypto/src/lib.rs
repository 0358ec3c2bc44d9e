//! # chatseal Crypto
//!
//! End-to-end message encryption: key pairs, key text, and the hybrid
//! encrypt/decrypt protocol.
//!
//! ## Overview
//!
//! Every message gets its own symmetric key. The message is sealed with that
//! key and the key is wrapped under the recipient's public key, so only the
//! holder of the matching private key can open it.
//!
//! ## Key Concepts
//!
//! - **KeyPair**: RSA (2048-bit minimum) pair for OAEP with SHA-256
//! - **EncryptionKey**: Public half; can only wrap session keys
//! - **DecryptionKey**: Private half; can only unwrap session keys
//! - **Session key**: Single-use AES-256-GCM key, crate-internal, wiped on drop
//! - **EncryptedEnvelope**: The wrapped key, nonce and ciphertext as base64
//!
//! ## Encryption Model
//!
//! 1. **Content**: AES-256-GCM under a fresh session key and 96-bit nonce;
//!    the GCM tag is the only integrity check
//! 2. **Key wrap**: RSA-OAEP (SHA-256) of the raw session key
//!
//! Failures to unwrap and failures to authenticate are reported with the
//! same message, so a forger cannot tell them apart.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatseal_crypto::{decrypt, encrypt, import_public_key, KeyPair};
//!
//! let bob = KeyPair::generate().unwrap();
//!
//! // Alice fetched Bob's key text from the directory
//! let bob_public = import_public_key(&bob.export_public_key()).unwrap();
//! let envelope = encrypt("hello", &bob_public).unwrap();
//!
//! // Bob opens it
//! let text = decrypt(&envelope, bob.private_key()).unwrap();
//! assert_eq!(text, "hello");
//! ```

pub mod envelope;
pub mod error;
pub mod hybrid;
pub mod keys;
pub mod session;

pub use envelope::{EncryptedEnvelope, EnvelopeParts};
pub use error::{CryptoError, Result};
pub use hybrid::{decrypt, decrypt_with_rng, encrypt, encrypt_with_rng};
pub use keys::{
    export_public_key, generate_key_pair, import_private_key, import_public_key, DecryptionKey,
    EncryptionKey, KeyPair, DEFAULT_KEY_BITS, MIN_KEY_BITS,
};
pub use session::{SessionNonce, NONCE_LEN, SESSION_KEY_LEN, TAG_LEN};
