//! Hybrid encryption: RSA-OAEP key wrapping over AES-256-GCM.
//!
//! Sender side:
//!
//! 1. draw a fresh session key and [`SessionNonce`]
//! 2. seal the UTF-8 plaintext with AES-256-GCM (no associated data)
//! 3. wrap the session key under the recipient's public key with OAEP
//! 4. base64 every field
//!
//! Recipient side reverses the steps. Integrity comes from the GCM tag only;
//! there is no second MAC.
//!
//! The functions are stateless. Randomness is passed in through the
//! `*_with_rng` variants; the plain variants use the OS random source.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::envelope::{EncryptedEnvelope, EnvelopeParts};
use crate::error::{CryptoError, Result};
use crate::keys::{DecryptionKey, EncryptionKey};
use crate::session::{SessionKey, SessionNonce};

/// Encrypt `plaintext` for `recipient` using the OS random source.
pub fn encrypt(plaintext: &str, recipient: &EncryptionKey) -> Result<EncryptedEnvelope> {
    encrypt_with_rng(&mut OsRng, plaintext, recipient)
}

/// Encrypt `plaintext` for `recipient`.
///
/// A new session key and nonce are drawn from `rng` on every call, so two
/// encryptions of the same text never share a nonce, wrapped key or
/// ciphertext.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &str,
    recipient: &EncryptionKey,
) -> Result<EncryptedEnvelope> {
    let session_key = SessionKey::generate(rng);
    let nonce = SessionNonce::generate(rng);

    let ciphertext = session_key.seal(&nonce, plaintext.as_bytes())?;
    let encrypted_session_key = recipient.wrap_session_key(rng, &session_key)?;
    drop(session_key);

    let fingerprint = recipient.fingerprint();
    debug!(
        recipient = &fingerprint[..16],
        ciphertext_len = ciphertext.len(),
        "sealed message"
    );

    Ok(EnvelopeParts {
        encrypted_session_key,
        nonce,
        ciphertext,
    }
    .encode())
}

/// Decrypt `envelope` with `holder` using the OS random source.
pub fn decrypt(envelope: &EncryptedEnvelope, holder: &DecryptionKey) -> Result<String> {
    decrypt_with_rng(&mut OsRng, envelope, holder)
}

/// Decrypt `envelope` with `holder`.
///
/// `rng` drives RSA blinding. When the session key cannot be unwrapped, a
/// throw-away key is still run through the AES-GCM check so a rejected
/// envelope costs the same work whichever stage rejects it. Both outcomes
/// surface as errors with the same message.
pub fn decrypt_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    envelope: &EncryptedEnvelope,
    holder: &DecryptionKey,
) -> Result<String> {
    let parts = envelope.decode()?;

    let unwrapped = holder.unwrap_session_key(rng, &parts.encrypted_session_key);
    let unwrap_failed = unwrapped.is_err();
    let session_key = unwrapped.unwrap_or_else(|_| SessionKey::generate(rng));

    let opened = session_key.open(&parts.nonce, &parts.ciphertext);
    drop(session_key);

    if unwrap_failed {
        warn!(kind = CryptoError::Decryption.kind(), "rejected envelope");
        return Err(CryptoError::Decryption);
    }

    let plaintext = opened.map_err(|e| {
        warn!(kind = e.kind(), "rejected envelope");
        e
    })?;

    String::from_utf8(plaintext).map_err(|e| {
        e.into_bytes().zeroize();
        CryptoError::Decode("plaintext is not valid UTF-8".into())
    })
}
