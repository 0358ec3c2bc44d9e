//! Per-message symmetric layer.
//!
//! Provides the single-use AES-256-GCM session key and its 96-bit nonce.
//! The authentication tag is appended to the ciphertext by the AEAD, so
//! there is no separate MAC field.
//!
//! The session key never leaves this crate. Callers go through
//! [`encrypt`](crate::encrypt) and [`decrypt`](crate::decrypt), which draw a
//! new key per message:
//!
//! ```compile_fail
//! use chatseal_crypto::session::SessionKey;
//!
//! let key = SessionKey::generate(&mut rand::rngs::OsRng);
//! ```

use std::fmt;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};

/// Session key length in bytes (AES-256).
pub const SESSION_KEY_LEN: usize = 32;

/// Nonce length in bytes (96-bit GCM nonce).
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// A 256-bit AES-GCM key used for exactly one message.
///
/// Not `Clone`: the key lives inside one encrypt or decrypt call and its
/// bytes are wiped when it is dropped.
pub(crate) struct SessionKey(Zeroizing<[u8; SESSION_KEY_LEN]>);

impl SessionKey {
    /// Generate a fresh key from the given random source.
    pub(crate) fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = Zeroizing::new([0u8; SESSION_KEY_LEN]);
        rng.fill_bytes(&mut *bytes);
        Self(bytes)
    }

    /// Rebuild a key from unwrapped bytes.
    ///
    /// Returns `None` unless exactly [`SESSION_KEY_LEN`] bytes are given.
    pub(crate) fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SESSION_KEY_LEN {
            return None;
        }
        let mut arr = Zeroizing::new([0u8; SESSION_KEY_LEN]);
        arr.copy_from_slice(bytes);
        Some(Self(arr))
    }

    /// Get the raw bytes, for wrapping under the recipient's key.
    pub(crate) fn as_bytes(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.0
    }

    fn cipher(&self) -> Aes256Gcm {
        let bytes: &[u8; SESSION_KEY_LEN] = &self.0;
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(bytes))
    }

    /// Encrypt `plaintext` under this key, with no associated data.
    ///
    /// The returned ciphertext ends with the [`TAG_LEN`]-byte tag.
    pub(crate) fn seal(&self, nonce: &SessionNonce, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.cipher()
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }

    /// Verify and decrypt `ciphertext` under this key.
    ///
    /// Any tag mismatch, including a ciphertext too short to hold a tag,
    /// yields [`CryptoError::Integrity`] and no plaintext.
    pub(crate) fn open(&self, nonce: &SessionNonce, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.cipher()
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|_| CryptoError::Integrity)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// A 96-bit nonce for AES-GCM.
///
/// Drawn at random per message. Each session key encrypts one message only,
/// so a random nonce never repeats under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionNonce(pub(crate) [u8; NONCE_LEN]);

impl SessionNonce {
    /// Generate a new random nonce.
    pub(crate) fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SessionNonce {
    type Error = CryptoError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; NONCE_LEN] = slice.try_into().map_err(|_| {
            CryptoError::Decode(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                slice.len()
            ))
        })?;
        Ok(Self(arr))
    }
}
