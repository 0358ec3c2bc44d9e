//! Encrypted message envelope.
//!
//! An envelope carries everything a recipient needs to open one message,
//! in transport form: three base64 strings. Who sent it and to whom is
//! metadata owned by the transport, never stored here.
//!
//! The JSON field names are the ones the chat wire format uses
//! (`encryptedAesKey`, `iv`, `encryptedMessage`). The descriptive names
//! are accepted as aliases on input. Unknown fields (a stray `hmac` from an
//! older client, say) are ignored.

use ciborium::Value;
use serde::{Deserialize, Serialize};

use chatseal_core::{bytes_to_text, text_to_bytes};

use crate::error::{CryptoError, Result};
use crate::hybrid;
use crate::keys::{DecryptionKey, EncryptionKey};
use crate::session::SessionNonce;

/// The transport form of one encrypted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Session key wrapped under the recipient's public key (RSA-OAEP).
    #[serde(rename = "encryptedAesKey", alias = "encryptedSessionKey")]
    pub encrypted_session_key: String,

    /// The 12-byte AES-GCM nonce.
    #[serde(rename = "iv", alias = "nonce")]
    pub nonce: String,

    /// AES-GCM ciphertext with the tag appended.
    #[serde(rename = "encryptedMessage", alias = "ciphertext")]
    pub ciphertext: String,
}

/// CBOR map keys for the binary framing.
mod cbor_keys {
    pub const SESSION_KEY: &str = "key";
    pub const NONCE: &str = "nonce";
    pub const CIPHERTEXT: &str = "ciphertext";
}

/// The decoded, binary form of an envelope.
///
/// Built only by this crate: as the output of [`EncryptedEnvelope::decode`]
/// or inside [`encrypt`](crate::encrypt).
///
/// ```compile_fail
/// use chatseal_crypto::{EnvelopeParts, SessionNonce};
///
/// let parts = EnvelopeParts {
///     encrypted_session_key: vec![0; 256],
///     nonce: SessionNonce::from_bytes([0; 12]),
///     ciphertext: vec![0; 16],
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeParts {
    pub(crate) encrypted_session_key: Vec<u8>,
    pub(crate) nonce: SessionNonce,
    pub(crate) ciphertext: Vec<u8>,
}

impl EnvelopeParts {
    /// Wrapped session key bytes.
    pub fn encrypted_session_key(&self) -> &[u8] {
        &self.encrypted_session_key
    }

    /// The AES-GCM nonce.
    pub fn nonce(&self) -> &SessionNonce {
        &self.nonce
    }

    /// Ciphertext bytes, tag included.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Encode into transport form.
    pub fn encode(&self) -> EncryptedEnvelope {
        EncryptedEnvelope {
            encrypted_session_key: bytes_to_text(&self.encrypted_session_key),
            nonce: bytes_to_text(self.nonce.as_bytes()),
            ciphertext: bytes_to_text(&self.ciphertext),
        }
    }

    /// Encode as a CBOR map of byte strings.
    fn to_cbor(&self) -> Result<Vec<u8>> {
        let value = Value::Map(vec![
            (
                Value::Text(cbor_keys::SESSION_KEY.to_string()),
                Value::Bytes(self.encrypted_session_key.clone()),
            ),
            (
                Value::Text(cbor_keys::NONCE.to_string()),
                Value::Bytes(self.nonce.as_bytes().to_vec()),
            ),
            (
                Value::Text(cbor_keys::CIPHERTEXT.to_string()),
                Value::Bytes(self.ciphertext.clone()),
            ),
        ]);

        let mut buf = Vec::new();
        ciborium::into_writer(&value, &mut buf)
            .map_err(|e| CryptoError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Decode from a CBOR map of byte strings.
    fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let value: Value =
            ciborium::from_reader(bytes).map_err(|e| CryptoError::Serialization(e.to_string()))?;
        let Value::Map(entries) = value else {
            return Err(CryptoError::Serialization("envelope is not a CBOR map".into()));
        };

        Ok(Self {
            encrypted_session_key: cbor_field(&entries, cbor_keys::SESSION_KEY)?.to_vec(),
            nonce: SessionNonce::try_from(cbor_field(&entries, cbor_keys::NONCE)?)?,
            ciphertext: cbor_field(&entries, cbor_keys::CIPHERTEXT)?.to_vec(),
        })
    }
}

fn cbor_field<'a>(entries: &'a [(Value, Value)], key: &str) -> Result<&'a [u8]> {
    match entries
        .iter()
        .find(|(k, _)| matches!(k, Value::Text(s) if s == key))
        .map(|(_, v)| v)
    {
        Some(Value::Bytes(b)) => Ok(b.as_slice()),
        Some(_) => Err(CryptoError::Serialization(format!("{key} is not a byte string"))),
        None => Err(CryptoError::Serialization(format!("missing {key}"))),
    }
}

impl EncryptedEnvelope {
    /// Assemble an envelope from fields received over a transport.
    pub fn new(
        encrypted_session_key: impl Into<String>,
        nonce: impl Into<String>,
        ciphertext: impl Into<String>,
    ) -> Self {
        Self {
            encrypted_session_key: encrypted_session_key.into(),
            nonce: nonce.into(),
            ciphertext: ciphertext.into(),
        }
    }

    /// Encrypt `plaintext` for the holder of `recipient`'s private key.
    pub fn seal(plaintext: &str, recipient: &EncryptionKey) -> Result<Self> {
        hybrid::encrypt(plaintext, recipient)
    }

    /// Decrypt with the holder's private key.
    pub fn open(&self, holder: &DecryptionKey) -> Result<String> {
        hybrid::decrypt(self, holder)
    }

    /// Decode all fields from base64.
    ///
    /// Fails with [`CryptoError::Decode`] on malformed base64 or a nonce
    /// that is not 12 bytes.
    pub fn decode(&self) -> Result<EnvelopeParts> {
        let encrypted_session_key = text_to_bytes(&self.encrypted_session_key)?;
        let nonce = SessionNonce::try_from(text_to_bytes(&self.nonce)?.as_slice())?;
        let ciphertext = text_to_bytes(&self.ciphertext)?;

        Ok(EnvelopeParts {
            encrypted_session_key,
            nonce,
            ciphertext,
        })
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    /// Parse from the JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    /// Serialize to CBOR, for transports that frame binary.
    ///
    /// The three fields are raw byte strings, so the frame is about three
    /// quarters the size of the base64 JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.decode()?.to_cbor()
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(EnvelopeParts::from_cbor(bytes)?.encode())
    }
}
