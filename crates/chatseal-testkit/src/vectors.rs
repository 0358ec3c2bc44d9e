//! Golden vectors for the transport codec and the envelope wire form.
//!
//! Any client that talks to a chatseal peer must decode these inputs to
//! exactly these outputs.

use chatseal_core::text_to_bytes;
use chatseal_crypto::EncryptedEnvelope;

/// A base64 input and the bytes it must decode to.
#[derive(Debug, Clone)]
pub struct CodecVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Encoded input, in any accepted variant.
    pub input: &'static str,
    /// Expected decoded bytes.
    pub expected: &'static [u8],
}

/// Inputs every decoder must accept.
pub fn codec_vectors() -> Vec<CodecVector> {
    vec![
        CodecVector {
            name: "empty",
            input: "",
            expected: b"",
        },
        CodecVector {
            name: "standard padded",
            input: "aGVsbG8=",
            expected: b"hello",
        },
        CodecVector {
            name: "standard unpadded",
            input: "aGVsbG8",
            expected: b"hello",
        },
        CodecVector {
            name: "double padding",
            input: "aA==",
            expected: b"h",
        },
        CodecVector {
            name: "double padding dropped",
            input: "aA",
            expected: b"h",
        },
        CodecVector {
            name: "standard alphabet high bytes",
            input: "+/8=",
            expected: &[0xfb, 0xff],
        },
        CodecVector {
            name: "url-safe alphabet",
            input: "-_8=",
            expected: &[0xfb, 0xff],
        },
        CodecVector {
            name: "url-safe unpadded",
            input: "-_8",
            expected: &[0xfb, 0xff],
        },
        CodecVector {
            name: "embedded line breaks",
            input: "aGVs\nbG8=\r\n",
            expected: b"hello",
        },
    ]
}

/// Inputs every decoder must reject.
pub fn invalid_codec_inputs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("single trailing character", "aGVsb"),
        ("character outside both alphabets", "aGV*bG8="),
        ("lone character", "a"),
    ]
}

/// A JSON envelope as sent by some client and its expected fields.
#[derive(Debug, Clone)]
pub struct EnvelopeVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Wire JSON.
    pub json: &'static str,
    /// Expected `(encrypted_session_key, nonce, ciphertext)`.
    pub expected: (&'static str, &'static str, &'static str),
}

/// Envelope wire forms every peer must accept.
pub fn envelope_vectors() -> Vec<EnvelopeVector> {
    vec![
        EnvelopeVector {
            name: "chat wire names",
            json: r#"{"encryptedAesKey":"a2V5","iv":"bm9uY2U=","encryptedMessage":"Y3Q="}"#,
            expected: ("a2V5", "bm9uY2U=", "Y3Q="),
        },
        EnvelopeVector {
            name: "descriptive names",
            json: r#"{"encryptedSessionKey":"a2V5","nonce":"bm9uY2U=","ciphertext":"Y3Q="}"#,
            expected: ("a2V5", "bm9uY2U=", "Y3Q="),
        },
        EnvelopeVector {
            name: "legacy hmac field ignored",
            json: r#"{"encryptedAesKey":"a2V5","iv":"bm9uY2U=","encryptedMessage":"Y3Q=","hmac":"aG1hYw=="}"#,
            expected: ("a2V5", "bm9uY2U=", "Y3Q="),
        },
    ]
}

/// Check every vector, returning the name of the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in codec_vectors() {
        match text_to_bytes(vector.input) {
            Ok(bytes) if bytes == vector.expected => {}
            Ok(bytes) => {
                return Err(format!(
                    "codec vector '{}' decoded to {:02x?}",
                    vector.name, bytes
                ))
            }
            Err(e) => return Err(format!("codec vector '{}' failed: {e}", vector.name)),
        }
    }

    for (name, input) in invalid_codec_inputs() {
        if text_to_bytes(input).is_ok() {
            return Err(format!("invalid input '{name}' was accepted"));
        }
    }

    for vector in envelope_vectors() {
        let envelope = EncryptedEnvelope::from_json(vector.json)
            .map_err(|e| format!("envelope vector '{}' failed: {e}", vector.name))?;
        let (key, nonce, ciphertext) = vector.expected;
        if envelope != EncryptedEnvelope::new(key, nonce, ciphertext) {
            return Err(format!("envelope vector '{}' parsed to {envelope:?}", vector.name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_envelope_serializes_to_wire_names() {
        let json = EncryptedEnvelope::new("a2V5", "bm9uY2U=", "Y3Q=").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["encryptedAesKey"], "a2V5");
        assert_eq!(value["iv"], "bm9uY2U=");
        assert_eq!(value["encryptedMessage"], "Y3Q=");
        assert!(value.get("hmac").is_none());
    }
}
