//! Wire message types.
//!
//! The envelope fields are flattened next to the identity metadata, which
//! gives the JSON shape chat clients exchange:
//!
//! ```text
//! send:    { receiver, encryptedAesKey, iv, encryptedMessage }
//! deliver: { id, senderUsername, receiverUsername,
//!            encryptedAesKey, iv, encryptedMessage, timestamp }
//! ```

use serde::{Deserialize, Serialize};

use chatseal_core::{MessageId, Username};
use chatseal_crypto::EncryptedEnvelope;

use crate::error::{Result, TransportError};

/// Field size limits enforced before a message is accepted for delivery.
pub mod limits {
    /// Max length of the base64 wrapped session key.
    pub const MAX_ENCRYPTED_KEY_LEN: usize = 1000;
    /// Max length of the base64 nonce.
    pub const MAX_NONCE_LEN: usize = 1000;
    /// Max length of the base64 ciphertext.
    pub const MAX_CIPHERTEXT_LEN: usize = 8000;
}

/// A message handed to the transport for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Who the message is for.
    pub receiver: Username,

    /// The sealed content.
    #[serde(flatten)]
    pub envelope: EncryptedEnvelope,
}

impl OutgoingMessage {
    /// Address an envelope to `receiver`.
    pub fn new(receiver: Username, envelope: EncryptedEnvelope) -> Self {
        Self { receiver, envelope }
    }

    /// Check that every envelope field respects the size limits.
    pub fn validate_limits(&self) -> std::result::Result<(), &'static str> {
        let envelope = &self.envelope;
        if envelope.encrypted_session_key.is_empty() || envelope.nonce.is_empty() {
            return Err("envelope field is empty");
        }
        if envelope.encrypted_session_key.len() > limits::MAX_ENCRYPTED_KEY_LEN {
            return Err("encrypted key too long");
        }
        if envelope.nonce.len() > limits::MAX_NONCE_LEN {
            return Err("nonce too long");
        }
        if envelope.ciphertext.len() > limits::MAX_CIPHERTEXT_LEN {
            return Err("ciphertext too long");
        }
        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TransportError::Serialization(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

/// A message as delivered to its receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    /// Identifier assigned by the transport.
    pub id: MessageId,

    /// Who sent it, as authenticated by the transport.
    #[serde(rename = "senderUsername")]
    pub sender: Username,

    /// Who it is for.
    #[serde(rename = "receiverUsername")]
    pub receiver: Username,

    /// The sealed content.
    #[serde(flatten)]
    pub envelope: EncryptedEnvelope,

    /// Delivery time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl DeliveredMessage {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TransportError::Serialization(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn envelope() -> EncryptedEnvelope {
        EncryptedEnvelope::new("a2V5", "bm9uY2Vub25jZTE=", "Y2lwaGVydGV4dA==")
    }

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    #[test]
    fn test_outgoing_json_shape() {
        let message = OutgoingMessage::new(user("bob"), envelope());
        let json: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

        assert_eq!(json["receiver"], "bob");
        assert_eq!(json["encryptedAesKey"], "a2V5");
        assert_eq!(json["iv"], "bm9uY2Vub25jZTE=");
        assert_eq!(json["encryptedMessage"], "Y2lwaGVydGV4dA==");
    }

    #[test]
    fn test_outgoing_from_client_json() {
        let json = r#"{
            "receiver": "bob",
            "encryptedAesKey": "a2V5",
            "iv": "bm9uY2Vub25jZTE=",
            "encryptedMessage": "Y2lwaGVydGV4dA==",
            "hmac": ""
        }"#;
        let message = OutgoingMessage::from_json(json).unwrap();
        assert_eq!(message, OutgoingMessage::new(user("bob"), envelope()));
    }

    #[test]
    fn test_outgoing_rejects_blank_receiver() {
        let json = r#"{"receiver": "", "encryptedAesKey": "a", "iv": "b", "encryptedMessage": "c"}"#;
        assert!(OutgoingMessage::from_json(json).is_err());
    }

    #[test]
    fn test_validate_limits() {
        let mut message = OutgoingMessage::new(user("bob"), envelope());
        assert!(message.validate_limits().is_ok());

        message.envelope.ciphertext = "A".repeat(limits::MAX_CIPHERTEXT_LEN + 1);
        assert_eq!(message.validate_limits(), Err("ciphertext too long"));

        message.envelope.ciphertext = String::new();
        message.envelope.encrypted_session_key = "A".repeat(limits::MAX_ENCRYPTED_KEY_LEN + 1);
        assert_eq!(message.validate_limits(), Err("encrypted key too long"));

        message.envelope.encrypted_session_key = String::new();
        assert_eq!(message.validate_limits(), Err("envelope field is empty"));
    }

    proptest! {
        #[test]
        fn test_limits_accept_exactly_the_bounded_sizes(
            key_len in 1usize..=1200,
            nonce_len in 1usize..=1200,
            ciphertext_len in 0usize..=9000,
        ) {
            let message = OutgoingMessage::new(
                user("bob"),
                EncryptedEnvelope::new("A".repeat(key_len), "A".repeat(nonce_len), "A".repeat(ciphertext_len)),
            );
            let within = key_len <= limits::MAX_ENCRYPTED_KEY_LEN
                && nonce_len <= limits::MAX_NONCE_LEN
                && ciphertext_len <= limits::MAX_CIPHERTEXT_LEN;
            prop_assert_eq!(message.validate_limits().is_ok(), within);
        }
    }

    #[test]
    fn test_delivered_json_roundtrip() {
        let message = DeliveredMessage {
            id: MessageId::from_bytes([0x11; 16]),
            sender: user("alice"),
            receiver: user("bob"),
            envelope: envelope(),
            timestamp: 1_736_870_400_000,
        };

        let json = message.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["senderUsername"], "alice");
        assert_eq!(value["receiverUsername"], "bob");
        assert_eq!(value["id"], "11".repeat(16));

        assert_eq!(DeliveredMessage::from_json(&json).unwrap(), message);
    }
}
