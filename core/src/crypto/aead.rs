// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! Symmetric cipher over AES-256-GCM and ChaCha20-Poly1305.
//!
//! Design notes:
//! - Both suites use 32-byte keys and 12-byte IVs.
//! - The IV is folded from the key bytes (see `nonce.rs`); it is not sent.
//! - Tag verification must fail closed (no partial plaintext).

use std::fmt;

// Import AEAD traits from aes_gcm's re-export to avoid duplicates.
use aes_gcm::aead::{Aead, KeyInit};

use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce};

use crate::config::KdfParams;
use crate::crypto::key::SecretKey;
use crate::crypto::nonce::derive_iv_12;
use crate::crypto::types::{Cipher, CipherSuite, CryptoError};
use crate::types::Result;

/// Concrete AEAD selected by the cipher suite.
#[derive(Clone)]
enum AeadImpl {
    AesGcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl AeadImpl {
    fn from_suite_and_key(suite: CipherSuite, key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = || CryptoError::InvalidKeyLen { expected: suite.key_len(), actual: key.len() };
        match suite {
            CipherSuite::Aes256Gcm => Aes256Gcm::new_from_slice(key).map(Self::AesGcm).map_err(|_| invalid()),
            CipherSuite::Chacha20Poly1305 => {
                ChaCha20Poly1305::new_from_slice(key).map(Self::ChaCha).map_err(|_| invalid())
            }
        }
    }

    fn seal(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .encrypt(AesNonce::from_slice(iv), plaintext)
                .map_err(|_| CryptoError::Encrypt { alg: CipherSuite::Aes256Gcm.name() }),
            AeadImpl::ChaCha(cipher) => cipher
                .encrypt(ChaNonce::from_slice(iv), plaintext)
                .map_err(|_| CryptoError::Encrypt { alg: CipherSuite::Chacha20Poly1305.name() }),
        }
    }

    fn open(&self, iv: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .decrypt(AesNonce::from_slice(iv), ciphertext_and_tag)
                .map_err(|_| CryptoError::Decrypt { alg: CipherSuite::Aes256Gcm.name() }),
            AeadImpl::ChaCha(cipher) => cipher
                .decrypt(ChaNonce::from_slice(iv), ciphertext_and_tag)
                .map_err(|_| CryptoError::Decrypt { alg: CipherSuite::Chacha20Poly1305.name() }),
        }
    }
}

/// Symmetric cipher holding one [`SecretKey`].
pub struct SymmetricCipher {
    suite: CipherSuite,
    key: SecretKey,
}

impl SymmetricCipher {
    /// Cipher without a key; `encrypt`/`decrypt` fail until one is set.
    pub fn new(suite: CipherSuite) -> Self {
        Self { suite, key: SecretKey::new(suite.name(), suite.key_len()) }
    }

    pub fn from_passphrase(suite: CipherSuite, passphrase: &str, salt: Option<&str>) -> Result<Self> {
        Self::from_passphrase_with(suite, passphrase, salt, &KdfParams::default())
    }

    pub fn from_passphrase_with(
        suite: CipherSuite,
        passphrase: &str,
        salt: Option<&str>,
        params: &KdfParams,
    ) -> Result<Self> {
        let key = SecretKey::from_passphrase(suite.name(), suite.key_len(), passphrase, salt, params)?;
        Ok(Self { suite, key })
    }

    pub fn random(suite: CipherSuite) -> Result<Self> {
        let key = SecretKey::random(suite.name(), suite.key_len())?;
        Ok(Self { suite, key })
    }

    pub fn from_key_bytes(suite: CipherSuite, bytes: &[u8]) -> Result<Self> {
        let key = SecretKey::from_bytes(suite.name(), suite.key_len(), bytes)?;
        Ok(Self { suite, key })
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    pub fn key_mut(&mut self) -> &mut SecretKey {
        &mut self.key
    }

    /// Raw key bytes for transport; `None` until a key is set.
    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.key.bytes()
    }

    fn aead(&self) -> Result<(AeadImpl, [u8; 12]), CryptoError> {
        let key = self.key.require()?;
        let iv = derive_iv_12(key)?;
        Ok((AeadImpl::from_suite_and_key(self.suite, key)?, iv))
    }
}

impl Cipher for SymmetricCipher {
    fn algorithm(&self) -> &'static str {
        self.suite.name()
    }

    fn key_id(&self) -> Result<u64> {
        self.key.key_id()
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (aead, iv) = self.aead()?;
        aead.seal(&iv, plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (aead, iv) = self.aead()?;
        aead.open(&iv, ciphertext)
    }
}

impl fmt::Debug for SymmetricCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricCipher").field("suite", &self.suite).field("key", &self.key).finish()
    }
}
