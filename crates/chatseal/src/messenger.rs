//! The Messenger: one party's end of an encrypted conversation.
//!
//! Ties the hybrid cipher to the transport, the public key directory and
//! the private key vault. RSA work runs on tokio's blocking pool so it
//! never stalls the async runtime.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::OsRng;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use chatseal_core::{MessageId, Username};
use chatseal_crypto::{
    decrypt, encrypt, import_private_key, import_public_key, DecryptionKey, KeyPair,
    DEFAULT_KEY_BITS,
};
use chatseal_transport::{DeliveredMessage, KeyDirectory, KeyVault, OutgoingMessage, Transport};

use crate::error::{ChatError, Result};

/// Configuration for a [`Messenger`].
#[derive(Debug, Clone)]
pub struct MessengerConfig {
    /// Modulus size for newly registered key pairs.
    pub key_bits: usize,
    /// How long [`Messenger::recv_timeout`] waits for a message.
    pub recv_timeout: Duration,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            recv_timeout: Duration::from_secs(30),
        }
    }
}

/// A decrypted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedText {
    /// Identifier assigned by the transport.
    pub id: MessageId,
    /// Sender, as reported by the transport.
    pub sender: Username,
    /// The plaintext.
    pub text: String,
    /// Delivery time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// One user's messaging endpoint.
///
/// Holds the user's [`DecryptionKey`] for its whole lifetime. The private
/// key's text form is only ever seen at registration, when it is handed to
/// the vault.
pub struct Messenger<T: Transport, D: KeyDirectory> {
    transport: T,
    directory: D,
    /// Shared with blocking decrypt tasks.
    key: Arc<DecryptionKey>,
    config: MessengerConfig,
}

impl<T: Transport, D: KeyDirectory> Messenger<T, D> {
    /// Register the transport's local user.
    ///
    /// Generates a fresh key pair, publishes the public key to `directory`
    /// and stores the private key text in `vault`.
    pub async fn register<V: KeyVault + ?Sized>(
        transport: T,
        directory: D,
        vault: &V,
        config: MessengerConfig,
    ) -> Result<Self> {
        let bits = config.key_bits;
        let pair = run_blocking(move || KeyPair::generate_with_rng(&mut OsRng, bits)).await?;

        vault
            .store(transport.local_user(), pair.export_private_key()?)
            .await?;

        Self::with_key_pair(transport, directory, pair, config).await
    }

    /// Start from an existing key pair.
    ///
    /// Publishes the public key to `directory`. Nothing is written to a vault.
    pub async fn with_key_pair(
        transport: T,
        directory: D,
        pair: KeyPair,
        config: MessengerConfig,
    ) -> Result<Self> {
        let user = transport.local_user().clone();
        directory.publish(&user, pair.export_public_key()).await?;

        let (public, private) = pair.into_parts();
        debug!(%user, bits = public.bits(), fingerprint = %public.fingerprint(), "registered");

        Ok(Self {
            transport,
            directory,
            key: Arc::new(private),
            config,
        })
    }

    /// Reopen a previously registered user from the vault.
    ///
    /// The directory is assumed to already hold the matching public key.
    pub async fn open<V: KeyVault + ?Sized>(
        transport: T,
        directory: D,
        vault: &V,
        config: MessengerConfig,
    ) -> Result<Self> {
        let text = vault.load(transport.local_user()).await?;
        let key = run_blocking(move || import_private_key(&text)).await?;

        debug!(user = %transport.local_user(), "opened from vault");
        Ok(Self {
            transport,
            directory,
            key: Arc::new(key),
            config,
        })
    }

    /// The local user.
    pub fn username(&self) -> &Username {
        self.transport.local_user()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The public key directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The active configuration.
    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    /// Encrypt `text` for `recipient` and send it.
    ///
    /// The recipient's public key is fetched from the directory on every
    /// call, so a re-registered recipient is picked up immediately.
    pub async fn send_text(&self, recipient: &Username, text: &str) -> Result<MessageId> {
        let key_text = self.directory.lookup(recipient).await?;
        let text = Zeroizing::new(text.to_owned());

        let envelope = run_blocking(move || {
            let key = import_public_key(&key_text)?;
            encrypt(&text, &key)
        })
        .await?;

        let id = self
            .transport
            .send(OutgoingMessage::new(recipient.clone(), envelope))
            .await?;

        debug!(%id, to = %recipient, "sent message");
        Ok(id)
    }

    /// Wait for the next message and decrypt it.
    pub async fn recv(&self) -> Result<ReceivedText> {
        let message = self.transport.recv().await?;
        self.open_message(message).await
    }

    /// Like [`recv`](Self::recv), giving up after the configured timeout.
    pub async fn recv_timeout(&self) -> Result<Option<ReceivedText>> {
        match self.transport.recv_timeout(self.config.recv_timeout).await? {
            Some(message) => self.open_message(message).await.map(Some),
            None => Ok(None),
        }
    }

    /// Decrypt a delivered message, e.g. one replayed from history.
    ///
    /// Fails with [`ChatError::Misaddressed`] if the message is for someone
    /// else, without attempting decryption.
    pub async fn open_message(&self, message: DeliveredMessage) -> Result<ReceivedText> {
        if &message.receiver != self.username() {
            return Err(ChatError::Misaddressed(message.receiver));
        }

        let DeliveredMessage {
            id,
            sender,
            envelope,
            timestamp,
            ..
        } = message;

        let key = Arc::clone(&self.key);
        let text = run_blocking(move || decrypt(&envelope, &key))
            .await
            .map_err(|e| {
                warn!(%id, from = %sender, error = %e, "could not open message");
                e
            })?;

        debug!(%id, from = %sender, "received message");
        Ok(ReceivedText {
            id,
            sender,
            text,
            timestamp,
        })
    }
}

/// Run a crypto operation on the blocking pool.
async fn run_blocking<F, R>(f: F) -> Result<R>
where
    F: FnOnce() -> chatseal_crypto::Result<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ChatError::TaskFailed(e.to_string()))?
        .map_err(ChatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MessengerConfig::default();
        assert_eq!(config.key_bits, 2048);
        assert_eq!(config.recv_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_run_blocking_maps_errors() {
        let result: Result<()> =
            run_blocking(|| Err(chatseal_crypto::CryptoError::Decryption)).await;
        assert!(result.unwrap_err().is_undecryptable());
    }

    #[tokio::test]
    async fn test_run_blocking_reports_panics() {
        let result: Result<()> = run_blocking(|| panic!("boom")).await;
        assert!(matches!(result, Err(ChatError::TaskFailed(_))));
    }
}
