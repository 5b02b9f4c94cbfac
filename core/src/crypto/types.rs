// ## 📂 File: `src/crypto/types.rs`

use std::fmt;
use thiserror::Error;

use crate::constants::{alg_names, IV_LEN_12, MAC_KEY_LEN, SYMMETRIC_KEY_LEN};

/// Symmetric cipher suites. Both use 32-byte keys and 12-byte IVs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    Aes256Gcm,
    Chacha20Poly1305,
}

impl CipherSuite {
    pub fn name(self) -> &'static str {
        match self {
            CipherSuite::Aes256Gcm => alg_names::AES256_GCM,
            CipherSuite::Chacha20Poly1305 => alg_names::CHACHA20_POLY1305,
        }
    }

    pub fn key_len(self) -> usize {
        SYMMETRIC_KEY_LEN
    }

    pub fn iv_len(self) -> usize {
        IV_LEN_12
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetric MAC algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MacAlg {
    HmacSha256,
}

impl MacAlg {
    pub fn name(self) -> &'static str {
        match self {
            MacAlg::HmacSha256 => alg_names::HMAC_SHA256,
        }
    }

    pub fn key_len(self) -> usize {
        MAC_KEY_LEN
    }
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Operation needs a key that was never set.
    #[error("{0} has to be set first")]
    MissingKey(&'static str),

    /// Raw key bytes of the wrong size.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Raw bytes do not form a valid key for the algorithm.
    #[error("invalid {0} key bytes")]
    InvalidKey(&'static str),

    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("{alg} encryption failed")]
    Encrypt { alg: &'static str },

    /// Authentication tag mismatch or malformed ciphertext.
    #[error("{alg} decryption failed")]
    Decrypt { alg: &'static str },

    /// Signature bytes that cannot even be parsed.
    #[error("malformed {alg} signature")]
    MalformedSignature { alg: &'static str },

    /// Secure random source failed.
    #[error("secure random failure: {0}")]
    Random(String),
}

/// Encrypts and decrypts byte buffers under a held key.
///
/// `key_id` names the key that can decrypt what `encrypt` produced; for
/// asymmetric ciphers that is the public half.
pub trait Cipher: Send + Sync {
    fn algorithm(&self) -> &'static str;
    fn key_id(&self) -> crate::types::Result<u64>;
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Computes and verifies a MAC or digital signature under a held key.
pub trait Signer: Send + Sync {
    fn algorithm(&self) -> &'static str;
    fn key_id(&self) -> crate::types::Result<u64>;
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;
    /// `Ok(false)` on mismatch; `Err` only when verification cannot run.
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;
}
