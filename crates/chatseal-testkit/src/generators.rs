//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chatseal_core::{bytes_to_text, text_to_bytes, Username};
use chatseal_crypto::EncryptedEnvelope;

/// Generate printable ASCII text up to `max_len` characters.
pub fn ascii_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0x20u8..0x7f, 0..=max_len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Generate arbitrary Unicode text up to `max_chars` scalar values.
pub fn unicode_text(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_chars).prop_map(String::from_iter)
}

/// Generate plaintext: a mix of ASCII and arbitrary Unicode.
pub fn plaintext(max_chars: usize) -> impl Strategy<Value = String> {
    prop_oneof![ascii_text(max_chars), unicode_text(max_chars)]
}

/// Generate a valid username.
pub fn username() -> impl Strategy<Value = Username> {
    "[a-z][a-z0-9_]{0,15}".prop_map(|name| Username::new(name).expect("non-blank pattern"))
}

/// Generate raw bytes of up to `max_len`.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// One of the three encoded envelope fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeField {
    SessionKey,
    Nonce,
    Ciphertext,
}

impl Arbitrary for EnvelopeField {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(EnvelopeField::SessionKey),
            Just(EnvelopeField::Nonce),
            Just(EnvelopeField::Ciphertext),
        ]
        .boxed()
    }
}

/// Flip bit `bit` of `bytes`, wrapping around the total bit length.
///
/// Does nothing on an empty slice.
pub fn flip_bit(bytes: &mut [u8], bit: usize) {
    if bytes.is_empty() {
        return;
    }
    let bit = bit % (bytes.len() * 8);
    bytes[bit / 8] ^= 1 << (bit % 8);
}

/// Return `envelope` with one bit of `field` flipped.
///
/// The field stays valid base64, so the change reaches the cipher.
pub fn tamper(envelope: &EncryptedEnvelope, field: EnvelopeField, bit: usize) -> EncryptedEnvelope {
    let mut tampered = envelope.clone();
    let target = match field {
        EnvelopeField::SessionKey => &mut tampered.encrypted_session_key,
        EnvelopeField::Nonce => &mut tampered.nonce,
        EnvelopeField::Ciphertext => &mut tampered.ciphertext,
    };

    let mut raw = text_to_bytes(target).expect("envelope field is valid base64");
    flip_bit(&mut raw, bit);
    *target = bytes_to_text(&raw);
    tampered
}
