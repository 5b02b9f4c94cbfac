//! crypto/registry.rs
//! Key-id -> live cipher/signer lookup used while decoding.
//!
//! Notes:
//! - Entries are keyed by the instance's key id *at registration time*. After
//!   changing a key, unregister with the old key and register again.
//! - Reader/writer locking; lookups never block each other.
//! - The sender only ever transmits the key id; these maps turn it back into a key.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::crypto::types::{Cipher, Signer};
use crate::types::Result;

/// Thread-safe map from key id to a shared instance.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    entries: RwLock<HashMap<u64, Arc<T>>>,
}

impl<T: ?Sized> Registry<T> {
    fn with_kind(kind: &'static str) -> Self {
        Self { kind, entries: RwLock::new(HashMap::new()) }
    }

    pub fn find(&self, id: u64) -> Option<Arc<T>> {
        self.entries.read().get(&id).cloned()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        tracing::debug!(registry = self.kind, "registry cleared");
    }

    fn insert(&self, id: u64, instance: Arc<T>) -> u64 {
        self.entries.write().insert(id, instance);
        tracing::debug!(registry = self.kind, key_id = id, "key registered");
        id
    }

    fn remove(&self, id: u64) -> Option<Arc<T>> {
        let removed = self.entries.write().remove(&id);
        if removed.is_some() {
            tracing::debug!(registry = self.kind, key_id = id, "key unregistered");
        }
        removed
    }
}

/// Decrypt keys, looked up by the key id stored in a Crypto header.
pub type KeyRegistry = Registry<dyn Cipher>;

/// Verifiers, looked up by the key id stored in a Signature header.
pub type VerifierRegistry = Registry<dyn Signer>;

impl Registry<dyn Cipher> {
    pub fn new() -> Self {
        Self::with_kind("keys")
    }

    /// Register under the cipher's current key id; returns that id.
    pub fn register(&self, cipher: Arc<dyn Cipher>) -> Result<u64> {
        let id = cipher.key_id()?;
        Ok(self.insert(id, cipher))
    }

    pub fn unregister(&self, cipher: &dyn Cipher) -> Result<bool> {
        Ok(self.remove(cipher.key_id()?).is_some())
    }
}

impl Default for Registry<dyn Cipher> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<dyn Signer> {
    pub fn new() -> Self {
        Self::with_kind("verifiers")
    }

    /// Register under the signer's current key id; returns that id.
    pub fn register(&self, signer: Arc<dyn Signer>) -> Result<u64> {
        let id = signer.key_id()?;
        Ok(self.insert(id, signer))
    }

    pub fn unregister(&self, signer: &dyn Signer) -> Result<bool> {
        Ok(self.remove(signer.key_id()?).is_some())
    }
}

impl Default for Registry<dyn Signer> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode-time key context handed to every header stage.
#[derive(Default)]
pub struct Keyring {
    keys: KeyRegistry,
    verifiers: VerifierRegistry,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }

    pub fn verifiers(&self) -> &VerifierRegistry {
        &self.verifiers
    }
}
