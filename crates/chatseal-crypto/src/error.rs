//! Error types for the crypto module.

use chatseal_core::CodecError;
use thiserror::Error;

/// Errors that can occur during key management and message encryption.
///
/// `Decryption` and `Integrity` render the same message on purpose: a peer
/// probing with forged envelopes must not learn which stage rejected them.
/// The variant itself is still available for local logging via
/// [`CryptoError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Malformed base64, a field of the wrong size, or non-UTF-8 plaintext.
    #[error("decoding error: {0}")]
    Decode(String),

    /// Malformed armored key text, passed through from
    /// [`CodecError::Format`] when a caller uses the codec directly with `?`.
    ///
    /// Key import never returns this: armor failures there are
    /// [`CryptoError::KeyImport`].
    #[error("format error: {0}")]
    Format(String),

    /// Key pair generation failed.
    #[error("key generation error: {0}")]
    KeyGeneration(String),

    /// Key text did not hold a usable key.
    #[error("key import error: {0}")]
    KeyImport(String),

    /// Encryption failed in the underlying primitive.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// The session key could not be unwrapped.
    #[error("message could not be decrypted")]
    Decryption,

    /// The authentication tag did not verify.
    #[error("message could not be decrypted")]
    Integrity,

    /// Envelope framing could not be read or written.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CryptoError {
    /// Short, stable name of the failure kind, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CryptoError::Decode(_) => "decode",
            CryptoError::Format(_) => "format",
            CryptoError::KeyGeneration(_) => "key_generation",
            CryptoError::KeyImport(_) => "key_import",
            CryptoError::Encryption(_) => "encryption",
            CryptoError::Decryption => "decryption",
            CryptoError::Integrity => "integrity",
            CryptoError::Serialization(_) => "serialization",
        }
    }

    /// Whether this error means "the envelope did not open".
    ///
    /// True for both `Decryption` and `Integrity`, which callers should treat
    /// identically.
    pub fn is_undecryptable(&self) -> bool {
        matches!(self, CryptoError::Decryption | CryptoError::Integrity)
    }
}

impl From<CodecError> for CryptoError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Decode(msg) | CodecError::InvalidIdentifier(msg) => {
                CryptoError::Decode(msg)
            }
            CodecError::Format(msg) => CryptoError::Format(msg),
        }
    }
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecryptable_errors_share_a_message() {
        assert_eq!(
            CryptoError::Decryption.to_string(),
            CryptoError::Integrity.to_string()
        );
        assert_ne!(CryptoError::Decryption.kind(), CryptoError::Integrity.kind());
        assert!(CryptoError::Decryption.is_undecryptable());
        assert!(CryptoError::Integrity.is_undecryptable());
        assert!(!CryptoError::Decode("x".into()).is_undecryptable());
    }

    #[test]
    fn test_codec_errors_map_to_matching_kind() {
        let decode: CryptoError = CodecError::Decode("bad".into()).into();
        let format: CryptoError = CodecError::Format("bad".into()).into();
        assert!(matches!(decode, CryptoError::Decode(_)));
        assert!(matches!(format, CryptoError::Format(_)));
    }

    #[test]
    fn test_format_reaches_callers_through_codec() {
        fn read_key_body(text: &str) -> Result<String> {
            let (body, _) = chatseal_core::unwrap_key_text(text)?;
            Ok(body)
        }

        assert!(matches!(
            read_key_body("no armor here"),
            Err(CryptoError::Format(_))
        ));
        assert!(matches!(
            crate::import_public_key("no armor here"),
            Err(CryptoError::KeyImport(_))
        ));
    }
}
