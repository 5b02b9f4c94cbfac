//! crypto/signer.rs
//! Sign/verify byte buffers.
//!
//! - `MacSigner`: HMAC-SHA256 under a symmetric [`SecretKey`]; sign and verify need the same key.
//! - `AsymmetricSigner`: Ed25519; sign with the private key, verify with the public key.

use std::fmt;

use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
use ed25519_dalek::{Signer as _, Verifier as _};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::KdfParams;
use crate::constants::{alg_names, ED25519_KEY_LEN};
use crate::crypto::hasher::hash;
use crate::crypto::key::SecretKey;
use crate::crypto::types::{CryptoError, MacAlg, Signer};
use crate::types::{JabError, Result};

type HmacSha256 = Hmac<Sha256>;

pub struct MacSigner {
    alg: MacAlg,
    key: SecretKey,
}

impl MacSigner {
    pub fn new(alg: MacAlg) -> Self {
        Self { alg, key: SecretKey::new(alg.name(), alg.key_len()) }
    }

    pub fn from_passphrase(passphrase: &str, salt: Option<&str>) -> Result<Self> {
        Self::from_passphrase_with(passphrase, salt, &KdfParams::default())
    }

    pub fn from_passphrase_with(passphrase: &str, salt: Option<&str>, params: &KdfParams) -> Result<Self> {
        let alg = MacAlg::HmacSha256;
        let key = SecretKey::from_passphrase(alg.name(), alg.key_len(), passphrase, salt, params)?;
        Ok(Self { alg, key })
    }

    pub fn random() -> Result<Self> {
        let alg = MacAlg::HmacSha256;
        let key = SecretKey::random(alg.name(), alg.key_len())?;
        Ok(Self { alg, key })
    }

    pub fn from_key_bytes(bytes: &[u8]) -> Result<Self> {
        let alg = MacAlg::HmacSha256;
        let key = SecretKey::from_bytes(alg.name(), alg.key_len(), bytes)?;
        Ok(Self { alg, key })
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.key.bytes()
    }

    fn mac(&self) -> Result<HmacSha256, CryptoError> {
        let key = self.key.require()?;
        <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|_| CryptoError::InvalidKeyLen { expected: self.alg.key_len(), actual: key.len() })
    }
}

impl Signer for MacSigner {
    fn algorithm(&self) -> &'static str {
        self.alg.name()
    }

    fn key_id(&self) -> Result<u64> {
        self.key.key_id()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let mut mac = self.mac()?;
        mac.update(data);
        // constant-time comparison
        Ok(mac.verify_slice(signature).is_ok())
    }
}

impl fmt::Debug for MacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacSigner").field("alg", &self.alg).field("key", &self.key).finish()
    }
}

const ED25519: &str = alg_names::ED25519;

#[derive(Default)]
pub struct AsymmetricSigner {
    signing: Option<SigningKey>,
    verifying: Option<VerifyingKey>,
}

impl AsymmetricSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        let verifying = signing.verifying_key();
        Self { signing: Some(signing), verifying: Some(verifying) }
    }

    /// Verify-only instance from exported public key bytes.
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self> {
        let mut signer = Self::new();
        signer.set_public_key_bytes(bytes)?;
        Ok(signer)
    }

    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self> {
        let mut signer = Self::new();
        signer.set_private_key_bytes(bytes)?;
        Ok(signer)
    }

    pub fn public_key_bytes(&self) -> Option<[u8; ED25519_KEY_LEN]> {
        self.verifying.map(|v| v.to_bytes())
    }

    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; ED25519_KEY_LEN]>> {
        self.signing.as_ref().map(|s| Zeroizing::new(s.to_bytes()))
    }

    pub fn set_public_key_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let raw = to_key_array(bytes)?;
        let verifying = VerifyingKey::from_bytes(&raw).map_err(|_| CryptoError::InvalidKey(ED25519))?;
        self.verifying = Some(verifying);
        Ok(())
    }

    /// Also replaces the public key with the one matching the private key.
    pub fn set_private_key_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let raw = Zeroizing::new(to_key_array(bytes)?);
        let signing = SigningKey::from_bytes(&raw);
        self.verifying = Some(signing.verifying_key());
        self.signing = Some(signing);
        Ok(())
    }
}

fn to_key_array(bytes: &[u8]) -> Result<[u8; ED25519_KEY_LEN], CryptoError> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLen { expected: ED25519_KEY_LEN, actual: bytes.len() })
}

impl Signer for AsymmetricSigner {
    fn algorithm(&self) -> &'static str {
        ED25519
    }

    fn key_id(&self) -> Result<u64> {
        let verifying = self.verifying.ok_or_else(|| JabError::state("public key has to be set first"))?;
        hash(&[ED25519.as_bytes(), verifying.as_bytes()])
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signing = self.signing.as_ref().ok_or(CryptoError::MissingKey("private key"))?;
        Ok(signing.sign(data).to_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let verifying = self.verifying.as_ref().ok_or(CryptoError::MissingKey("public key"))?;
        let signature =
            Signature::from_slice(signature).map_err(|_| CryptoError::MalformedSignature { alg: ED25519 })?;
        Ok(verifying.verify(data, &signature).is_ok())
    }
}

impl fmt::Debug for AsymmetricSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricSigner")
            .field("has_private", &self.signing.is_some())
            .field("has_public", &self.verifying.is_some())
            .finish()
    }
}
