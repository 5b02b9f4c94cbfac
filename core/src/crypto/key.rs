//! crypto/key.rs
//! Symmetric key material: one algorithm name, one key length, one live key.
//!
//! A key is either derived from a passphrase, generated from the OS random
//! source, or imported from raw bytes exported by another instance. The key id
//! hashes the algorithm name together with the raw key bytes, so two instances
//! holding the same key under the same algorithm always agree on the id.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::KdfParams;
use crate::crypto::hasher::hash;
use crate::crypto::kdf::derive_passphrase_key;
use crate::crypto::types::CryptoError;
use crate::types::{JabError, Result};

pub struct SecretKey {
    algorithm: &'static str,
    key_len: usize,
    bytes: Option<Zeroizing<Vec<u8>>>,
}

impl SecretKey {
    /// Empty key holder. `key_len` is in bytes.
    pub fn new(algorithm: &'static str, key_len: usize) -> Self {
        Self { algorithm, key_len, bytes: None }
    }

    pub fn from_passphrase(
        algorithm: &'static str,
        key_len: usize,
        passphrase: &str,
        salt: Option<&str>,
        params: &KdfParams,
    ) -> Result<Self> {
        let mut key = Self::new(algorithm, key_len);
        key.set_passphrase(passphrase, salt, params)?;
        Ok(key)
    }

    pub fn random(algorithm: &'static str, key_len: usize) -> Result<Self> {
        let mut key = Self::new(algorithm, key_len);
        key.set_random()?;
        Ok(key)
    }

    pub fn from_bytes(algorithm: &'static str, key_len: usize, bytes: &[u8]) -> Result<Self> {
        let mut key = Self::new(algorithm, key_len);
        key.set_bytes(bytes)?;
        Ok(key)
    }

    pub fn set_passphrase(&mut self, passphrase: &str, salt: Option<&str>, params: &KdfParams) -> Result<()> {
        let derived = derive_passphrase_key(passphrase, salt, self.key_len, params)?;
        self.bytes = Some(derived);
        Ok(())
    }

    pub fn set_random(&mut self) -> Result<()> {
        let mut bytes = Zeroizing::new(vec![0u8; self.key_len]);
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| CryptoError::Random(e.to_string()))?;
        self.bytes = Some(bytes);
        Ok(())
    }

    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != self.key_len {
            return Err(CryptoError::InvalidKeyLen { expected: self.key_len, actual: bytes.len() }.into());
        }
        self.bytes = Some(Zeroizing::new(bytes.to_vec()));
        Ok(())
    }

    /// Raw key bytes for transport or storage; `None` until a key is set.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_ref().map(|b| b.as_slice())
    }

    /// Raw key bytes, or `CryptoError::MissingKey` for crypto operations.
    pub fn require(&self) -> Result<&[u8], CryptoError> {
        self.bytes().ok_or(CryptoError::MissingKey("secret key"))
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn is_set(&self) -> bool {
        self.bytes.is_some()
    }

    /// Stable 53-bit id of (algorithm, key bytes).
    ///
    /// # Errors
    /// - `JabError::State` if no key is set.
    pub fn key_id(&self) -> Result<u64> {
        let bytes = self
            .bytes()
            .ok_or_else(|| JabError::state("crypto key has to be set first"))?;
        hash(&[self.algorithm.as_bytes(), bytes])
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("algorithm", &self.algorithm)
            .field("key_len", &self.key_len)
            .field("is_set", &self.is_set())
            .finish_non_exhaustive()
    }
}
