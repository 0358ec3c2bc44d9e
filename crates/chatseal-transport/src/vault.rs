//! Local private key storage.
//!
//! Holds the holder's armored private key text between sessions. How the
//! text is protected at rest is up to the implementation; the in-memory
//! vault here keeps it only for the life of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use chatseal_core::Username;

use crate::error::{Result, TransportError};

/// Owner-local storage for private key text.
#[async_trait]
pub trait KeyVault: Send + Sync {
    /// Store the private key text for `user`, replacing any previous one.
    async fn store(&self, user: &Username, private_key: Zeroizing<String>) -> Result<()>;

    /// Load the private key text for `user`.
    ///
    /// Fails with [`TransportError::KeyNotFound`] if nothing is stored.
    async fn load(&self, user: &Username) -> Result<Zeroizing<String>>;
}

/// A process-local vault. Contents are wiped when dropped.
#[derive(Default)]
pub struct MemoryVault {
    keys: RwLock<HashMap<Username, Zeroizing<String>>>,
}

impl MemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyVault for MemoryVault {
    async fn store(&self, user: &Username, private_key: Zeroizing<String>) -> Result<()> {
        self.keys.write().await.insert(user.clone(), private_key);
        Ok(())
    }

    async fn load(&self, user: &Username) -> Result<Zeroizing<String>> {
        self.keys
            .read()
            .await
            .get(user)
            .cloned()
            .ok_or_else(|| TransportError::KeyNotFound(user.clone()))
    }
}
