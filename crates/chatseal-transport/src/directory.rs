//! Public key directory.
//!
//! Maps a username to the armored public key text that user registered.
//! The directory stores text only; importing and validating the key is the
//! caller's job.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chatseal_core::Username;

use crate::error::{Result, TransportError};

/// Lookup service for recipients' public keys.
#[async_trait]
pub trait KeyDirectory: Send + Sync {
    /// Publish (or replace) the public key text for `user`.
    async fn publish(&self, user: &Username, public_key: String) -> Result<()>;

    /// Fetch the public key text for `user`.
    ///
    /// Fails with [`TransportError::UnknownUser`] if nothing is published.
    async fn lookup(&self, user: &Username) -> Result<String>;
}

#[async_trait]
impl<D: KeyDirectory + ?Sized> KeyDirectory for Arc<D> {
    async fn publish(&self, user: &Username, public_key: String) -> Result<()> {
        (**self).publish(user, public_key).await
    }

    async fn lookup(&self, user: &Username) -> Result<String> {
        (**self).lookup(user).await
    }
}

/// An in-memory directory.
#[derive(Default)]
pub struct MemoryDirectory {
    keys: RwLock<HashMap<Username, String>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published keys.
    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    /// Whether no key has been published.
    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

#[async_trait]
impl KeyDirectory for MemoryDirectory {
    async fn publish(&self, user: &Username, public_key: String) -> Result<()> {
        self.keys.write().await.insert(user.clone(), public_key);
        tracing::debug!(%user, "published public key");
        Ok(())
    }

    async fn lookup(&self, user: &Username) -> Result<String> {
        self.keys
            .read()
            .await
            .get(user)
            .cloned()
            .ok_or_else(|| TransportError::UnknownUser(user.clone()))
    }
}
