//! Property tests for the hybrid cipher against fixed key pairs.

use proptest::prelude::*;

use chatseal_crypto::{
    decrypt, encrypt, export_public_key, import_private_key, import_public_key, CryptoError,
    EncryptedEnvelope,
};
use chatseal_testkit::fixtures::{alice_keys, bob_keys, mallory_keys};
use chatseal_testkit::generators::{plaintext, tamper, EnvelopeField};

fn config() -> ProptestConfig {
    // Every case costs an RSA private-key operation.
    ProptestConfig::with_cases(32)
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn roundtrip_any_text(text in plaintext(512)) {
        let envelope = encrypt(&text, bob_keys().public_key()).unwrap();
        let opened = decrypt(&envelope, bob_keys().private_key()).unwrap();
        prop_assert_eq!(opened, text);
    }

    #[test]
    fn wrong_key_never_opens(text in plaintext(64)) {
        let envelope = encrypt(&text, bob_keys().public_key()).unwrap();
        let result = decrypt(&envelope, mallory_keys().private_key());
        prop_assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn any_single_bit_flip_is_rejected(field: EnvelopeField, bit in any::<usize>()) {
        let envelope = encrypt("attack at dawn", alice_keys().public_key()).unwrap();
        let tampered = tamper(&envelope, field, bit);

        let err = decrypt(&tampered, alice_keys().private_key()).unwrap_err();
        prop_assert!(err.is_undecryptable(), "unexpected error: {:?}", err);
        prop_assert_eq!(err.to_string(), "message could not be decrypted");
    }

    #[test]
    fn wire_json_roundtrip_still_opens(text in plaintext(128)) {
        let envelope = encrypt(&text, bob_keys().public_key()).unwrap();
        let parsed = EncryptedEnvelope::from_json(&envelope.to_json().unwrap()).unwrap();
        prop_assert_eq!(decrypt(&parsed, bob_keys().private_key()).unwrap(), text);
    }
}

#[test]
fn hello_scenario() {
    let bob = bob_keys();

    let bob_public = import_public_key(&bob.export_public_key()).unwrap();
    let envelope = encrypt("hello", &bob_public).unwrap();

    assert_eq!(decrypt(&envelope, bob.private_key()).unwrap(), "hello");
    assert!(decrypt(&envelope, alice_keys().private_key()).is_err());
}

#[test]
fn exported_keys_reimport_to_same_key() {
    let alice = alice_keys();

    let public_text = export_public_key(alice.public_key());
    let public = import_public_key(&public_text).unwrap();
    assert_eq!(&public, alice.public_key());
    assert_eq!(public.export(), public_text);

    let private_text = alice.export_private_key().unwrap();
    let private = import_private_key(&private_text).unwrap();

    let envelope = encrypt("after reimport", &public).unwrap();
    assert_eq!(decrypt(&envelope, &private).unwrap(), "after reimport");
}

#[test]
fn url_safe_unpadded_fields_still_open() {
    let envelope = encrypt("hello", bob_keys().public_key()).unwrap();

    let to_url_safe = |s: &str| {
        s.trim_end_matches('=')
            .replace('+', "-")
            .replace('/', "_")
    };
    let rewritten = EncryptedEnvelope::new(
        to_url_safe(&envelope.encrypted_session_key),
        to_url_safe(&envelope.nonce),
        to_url_safe(&envelope.ciphertext),
    );

    assert_eq!(decrypt(&rewritten, bob_keys().private_key()).unwrap(), "hello");
}

#[test]
fn key_text_with_reflowed_lines_imports() {
    let text = bob_keys().export_public_key();
    let reflowed: String = text
        .lines()
        .map(|line| format!("{line}\r\n"))
        .collect();

    assert_eq!(&import_public_key(&reflowed).unwrap(), bob_keys().public_key());
}

#[test]
fn private_key_text_is_not_a_public_key() {
    let private_text = alice_keys().export_private_key().unwrap();
    assert!(matches!(
        import_public_key(&private_text),
        Err(CryptoError::KeyImport(_))
    ));
}
