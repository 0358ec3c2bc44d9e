//! Transport abstraction for envelope delivery.
//!
//! The transport moves sealed envelopes between named parties and attaches
//! the identity metadata (sender, receiver, id, timestamp). Implementations
//! may use WebSockets, HTTP, or any other channel; the crypto layer never
//! sees which.

use std::time::Duration;

use async_trait::async_trait;

use chatseal_core::{MessageId, Username};

use crate::error::Result;
use crate::messages::{DeliveredMessage, OutgoingMessage};

/// Transport trait for sending and receiving sealed messages.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Hand a message over for delivery.
    ///
    /// Returns the id the transport assigned to it.
    async fn send(&self, message: OutgoingMessage) -> Result<MessageId>;

    /// Receive the next message addressed to the local user.
    ///
    /// Blocks until a message is available or an error occurs.
    async fn recv(&self) -> Result<DeliveredMessage>;

    /// Receive with timeout.
    ///
    /// Returns None if timeout expires before a message arrives.
    async fn recv_timeout(&self, timeout: Duration) -> Result<Option<DeliveredMessage>>;

    /// The username this transport sends and receives as.
    fn local_user(&self) -> &Username;
}

/// A simple in-memory transport for testing.
///
/// Uses channels to simulate a relay server between parties.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::{mpsc, Mutex, RwLock};

    use crate::error::TransportError;

    /// Shared state for the in-memory relay.
    pub struct MemoryRelay {
        /// Delivery channels for each connected user.
        senders: RwLock<HashMap<Username, mpsc::Sender<DeliveredMessage>>>,
        /// Every message accepted, in delivery order.
        history: RwLock<Vec<DeliveredMessage>>,
    }

    impl MemoryRelay {
        /// Create a new relay.
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Create a transport connected to this relay as `user`.
        pub async fn connect(self: &Arc<Self>, user: Username) -> MemoryTransport {
            let (tx, rx) = mpsc::channel(1000);

            self.senders.write().await.insert(user.clone(), tx);

            MemoryTransport {
                user,
                relay: Arc::clone(self),
                receiver: Mutex::new(rx),
            }
        }

        /// Messages received by `user`, oldest first.
        pub async fn inbox(&self, user: &Username) -> Vec<DeliveredMessage> {
            let history = self.history.read().await;
            history
                .iter()
                .filter(|m| &m.receiver == user)
                .cloned()
                .collect()
        }

        /// Messages sent by `user`, oldest first.
        pub async fn sent(&self, user: &Username) -> Vec<DeliveredMessage> {
            let history = self.history.read().await;
            history
                .iter()
                .filter(|m| &m.sender == user)
                .cloned()
                .collect()
        }
    }

    impl Default for MemoryRelay {
        fn default() -> Self {
            Self {
                senders: RwLock::new(HashMap::new()),
                history: RwLock::new(Vec::new()),
            }
        }
    }

    /// In-memory transport implementation.
    pub struct MemoryTransport {
        user: Username,
        relay: Arc<MemoryRelay>,
        receiver: Mutex<mpsc::Receiver<DeliveredMessage>>,
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn send(&self, message: OutgoingMessage) -> Result<MessageId> {
            message
                .validate_limits()
                .map_err(|e| TransportError::InvalidMessage(e.into()))?;

            // Cloned so the registry lock is not held while the queue is full.
            let sender = self
                .relay
                .senders
                .read()
                .await
                .get(&message.receiver)
                .cloned()
                .ok_or_else(|| TransportError::UnknownUser(message.receiver.clone()))?;

            let delivered = DeliveredMessage {
                id: MessageId::generate(),
                sender: self.user.clone(),
                receiver: message.receiver,
                envelope: message.envelope,
                timestamp: now_millis(),
            };
            let id = delivered.id;

            sender
                .send(delivered.clone())
                .await
                .map_err(|_| TransportError::Disconnected("receiver dropped".into()))?;
            self.relay.history.write().await.push(delivered);

            tracing::debug!(%id, from = %self.user, "relayed message");
            Ok(id)
        }

        async fn recv(&self) -> Result<DeliveredMessage> {
            let mut rx = self.receiver.lock().await;
            rx.recv()
                .await
                .ok_or_else(|| TransportError::Disconnected("channel closed".into()))
        }

        async fn recv_timeout(&self, timeout: Duration) -> Result<Option<DeliveredMessage>> {
            let mut rx = self.receiver.lock().await;
            match tokio::time::timeout(timeout, rx.recv()).await {
                Ok(Some(message)) => Ok(Some(message)),
                Ok(None) => Err(TransportError::Disconnected("channel closed".into())),
                Err(_) => Ok(None), // Timeout
            }
        }

        fn local_user(&self) -> &Username {
            &self.user
        }
    }

    fn now_millis() -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryRelay;
    use super::*;
    use std::sync::Arc;
    use crate::error::TransportError;
    use chatseal_crypto::EncryptedEnvelope;

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    fn envelope() -> EncryptedEnvelope {
        EncryptedEnvelope::new("a2V5", "bm9uY2Vub25jZTE=", "Y2lwaGVydGV4dA==")
    }

    #[tokio::test]
    async fn test_memory_transport_send_recv() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;
        let bob = relay.connect(user("bob")).await;

        let id = alice
            .send(OutgoingMessage::new(user("bob"), envelope()))
            .await
            .unwrap();

        let delivered = bob.recv().await.unwrap();
        assert_eq!(delivered.id, id);
        assert_eq!(delivered.sender, user("alice"));
        assert_eq!(delivered.receiver, user("bob"));
        assert_eq!(delivered.envelope, envelope());
        assert!(delivered.timestamp > 0);
    }

    #[tokio::test]
    async fn test_send_to_unknown_user_fails() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;

        let result = alice
            .send(OutgoingMessage::new(user("nobody"), envelope()))
            .await;
        assert!(matches!(result, Err(TransportError::UnknownUser(_))));
    }

    #[tokio::test]
    async fn test_send_to_dropped_receiver_is_not_recorded() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;
        let bob = relay.connect(user("bob")).await;
        drop(bob);

        let result = alice
            .send(OutgoingMessage::new(user("bob"), envelope()))
            .await;
        assert!(matches!(result, Err(TransportError::Disconnected(_))));
        assert!(relay.inbox(&user("bob")).await.is_empty());
        assert!(relay.sent(&user("alice")).await.is_empty());
    }

    #[tokio::test]
    async fn test_full_queue_does_not_block_connect() {
        let relay = MemoryRelay::new();
        let alice = Arc::new(relay.connect(user("alice")).await);
        let _bob = relay.connect(user("bob")).await;

        for _ in 0..1000 {
            alice
                .send(OutgoingMessage::new(user("bob"), envelope()))
                .await
                .unwrap();
        }

        // Bob never reads, so this send waits for queue space.
        let blocked = {
            let alice = Arc::clone(&alice);
            tokio::spawn(async move {
                alice
                    .send(OutgoingMessage::new(user("bob"), envelope()))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!blocked.is_finished());

        let carol = tokio::time::timeout(Duration::from_secs(1), relay.connect(user("carol")))
            .await
            .expect("connect must not wait on a full queue");
        assert_eq!(carol.local_user(), &user("carol"));
        blocked.abort();
    }

    #[tokio::test]
    async fn test_send_rejects_oversized_envelope() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;
        let _bob = relay.connect(user("bob")).await;

        let mut big = envelope();
        big.ciphertext = "A".repeat(10_000);
        let result = alice.send(OutgoingMessage::new(user("bob"), big)).await;
        assert!(matches!(result, Err(TransportError::InvalidMessage(_))));
    }

    #[tokio::test]
    async fn test_recv_timeout_expires() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;

        let result = alice
            .recv_timeout(Duration::from_millis(20))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_inbox_and_sent_history() {
        let relay = MemoryRelay::new();
        let alice = relay.connect(user("alice")).await;
        let bob = relay.connect(user("bob")).await;

        alice
            .send(OutgoingMessage::new(user("bob"), envelope()))
            .await
            .unwrap();
        bob.send(OutgoingMessage::new(user("alice"), envelope()))
            .await
            .unwrap();
        alice
            .send(OutgoingMessage::new(user("bob"), envelope()))
            .await
            .unwrap();

        assert_eq!(relay.inbox(&user("bob")).await.len(), 2);
        assert_eq!(relay.sent(&user("bob")).await.len(), 1);
        assert_eq!(relay.inbox(&user("alice")).await.len(), 1);
        assert_eq!(alice.local_user(), &user("alice"));
    }
}
