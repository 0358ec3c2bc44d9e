//! Test fixtures and helpers.
//!
//! RSA key generation is slow, so the named parties' key pairs are
//! generated once per process from fixed seeds and shared.

use std::sync::{Arc, OnceLock};

use rand::rngs::StdRng;
use rand::SeedableRng;

use chatseal_core::Username;
use chatseal_crypto::{KeyPair, DEFAULT_KEY_BITS};
use chatseal_transport::{KeyDirectory, MemoryDirectory, MemoryRelay, MemoryTransport, MemoryVault};

/// Generate a deterministic key pair from `seed`.
pub fn seeded_key_pair(seed: u64) -> KeyPair {
    let mut rng = StdRng::seed_from_u64(seed);
    KeyPair::generate_with_rng(&mut rng, DEFAULT_KEY_BITS)
        .expect("key generation with a valid size")
}

/// Alice's key pair.
pub fn alice_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded_key_pair(0xA11CE))
}

/// Bob's key pair.
pub fn bob_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded_key_pair(0xB0B))
}

/// Mallory's key pair. Never the intended recipient.
pub fn mallory_keys() -> &'static KeyPair {
    static KEYS: OnceLock<KeyPair> = OnceLock::new();
    KEYS.get_or_init(|| seeded_key_pair(0x3A11))
}

/// Parse a username, panicking on blank input.
pub fn username(name: &str) -> Username {
    Username::new(name).expect("non-blank username")
}

/// A relay, a shared directory and a vault.
pub struct TestNetwork {
    pub relay: Arc<MemoryRelay>,
    pub directory: Arc<MemoryDirectory>,
    pub vault: MemoryVault,
}

impl TestNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self {
            relay: MemoryRelay::new(),
            directory: Arc::new(MemoryDirectory::new()),
            vault: MemoryVault::new(),
        }
    }

    /// Connect `name` to the relay.
    pub async fn join(&self, name: &str) -> MemoryTransport {
        self.relay.connect(username(name)).await
    }

    /// Connect `name` and publish the public half of `keys` for it.
    pub async fn join_with_keys(&self, name: &str, keys: &KeyPair) -> MemoryTransport {
        let transport = self.join(name).await;
        self.directory
            .publish(&username(name), keys.export_public_key())
            .await
            .expect("memory directory accepts any key");
        transport
    }
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self::new()
    }
}
