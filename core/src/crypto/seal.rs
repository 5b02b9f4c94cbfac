//! crypto/seal.rs
//! Asymmetric cipher: encrypt to a public key, decrypt with the private key.
//!
//! Design:
//! - Ephemeral X25519 exchange against the recipient public key.
//! - HKDF-SHA256(shared, salt = ephemeral_pub || recipient_pub) -> 32-byte key.
//! - ChaCha20-Poly1305 with the IV folded from that key.
//! - Wire layout: [ ephemeral_pub: 32 ][ ciphertext || tag ].
//!
//! Key id hashes the algorithm name with the *public* key, so the sender can
//! name the key without holding the private half.

use std::fmt;

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::constants::{alg_names, X25519_KEY_LEN};
use crate::crypto::hasher::hash;
use crate::crypto::kdf::derive_seal_key;
use crate::crypto::nonce::derive_iv_12;
use crate::crypto::types::{Cipher, CryptoError};
use crate::types::{JabError, Result};

const ALG: &str = alg_names::X25519_CHACHA20_POLY1305;
const TAG_LEN: usize = 16;

#[derive(Default)]
pub struct AsymmetricCipher {
    secret: Option<StaticSecret>,
    public: Option<PublicKey>,
}

impl AsymmetricCipher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh key pair from the OS random source.
    pub fn random() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey::from(&secret);
        Self { secret: Some(secret), public: Some(public) }
    }

    /// Encrypt-only instance built from exported public key bytes.
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cipher = Self::new();
        cipher.set_public_key_bytes(bytes)?;
        Ok(cipher)
    }

    /// Full key pair rebuilt from exported private key bytes.
    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cipher = Self::new();
        cipher.set_private_key_bytes(bytes)?;
        Ok(cipher)
    }

    pub fn public_key_bytes(&self) -> Option<[u8; X25519_KEY_LEN]> {
        self.public.map(|p| p.to_bytes())
    }

    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; X25519_KEY_LEN]>> {
        self.secret.as_ref().map(|s| Zeroizing::new(s.to_bytes()))
    }

    pub fn set_public_key_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let raw = to_key_array(bytes)?;
        self.public = Some(PublicKey::from(raw));
        Ok(())
    }

    /// Also replaces the public key with the one matching the private key.
    pub fn set_private_key_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let raw = Zeroizing::new(to_key_array(bytes)?);
        let secret = StaticSecret::from(*raw);
        self.public = Some(PublicKey::from(&secret));
        self.secret = Some(secret);
        Ok(())
    }

    fn open_with(secret: &StaticSecret, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < X25519_KEY_LEN + TAG_LEN {
            return Err(CryptoError::Decrypt { alg: ALG });
        }
        let (eph_bytes, ciphertext) = sealed.split_at(X25519_KEY_LEN);
        let mut eph_raw = [0u8; X25519_KEY_LEN];
        eph_raw.copy_from_slice(eph_bytes);
        let eph_public = PublicKey::from(eph_raw);
        let own_public = PublicKey::from(secret);

        let shared = secret.diffie_hellman(&eph_public);
        let key = derive_seal_key(shared.as_bytes(), &seal_salt(&eph_public, &own_public))?;
        let iv = derive_iv_12(key.as_ref())?;
        let aead = ChaCha20Poly1305::new_from_slice(key.as_ref())
            .map_err(|_| CryptoError::Decrypt { alg: ALG })?;
        aead.decrypt(Nonce::from_slice(&iv), ciphertext)
            .map_err(|_| CryptoError::Decrypt { alg: ALG })
    }
}

fn to_key_array(bytes: &[u8]) -> Result<[u8; X25519_KEY_LEN], CryptoError> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLen { expected: X25519_KEY_LEN, actual: bytes.len() })
}

fn seal_salt(eph: &PublicKey, recipient: &PublicKey) -> [u8; 2 * X25519_KEY_LEN] {
    let mut salt = [0u8; 2 * X25519_KEY_LEN];
    salt[..X25519_KEY_LEN].copy_from_slice(eph.as_bytes());
    salt[X25519_KEY_LEN..].copy_from_slice(recipient.as_bytes());
    salt
}

impl Cipher for AsymmetricCipher {
    fn algorithm(&self) -> &'static str {
        ALG
    }

    fn key_id(&self) -> Result<u64> {
        let public = self.public.ok_or_else(|| JabError::state("public key has to be set first"))?;
        hash(&[ALG.as_bytes(), public.as_bytes()])
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let recipient = self.public.ok_or(CryptoError::MissingKey("public key"))?;

        let eph_secret = StaticSecret::random_from_rng(OsRng);
        let eph_public = PublicKey::from(&eph_secret);
        let shared = eph_secret.diffie_hellman(&recipient);

        let key = derive_seal_key(shared.as_bytes(), &seal_salt(&eph_public, &recipient))?;
        let iv = derive_iv_12(key.as_ref())?;
        let aead = ChaCha20Poly1305::new_from_slice(key.as_ref())
            .map_err(|_| CryptoError::Encrypt { alg: ALG })?;
        let ciphertext = aead
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|_| CryptoError::Encrypt { alg: ALG })?;

        let mut out = Vec::with_capacity(X25519_KEY_LEN + ciphertext.len());
        out.extend_from_slice(eph_public.as_bytes());
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let secret = self.secret.as_ref().ok_or(CryptoError::MissingKey("private key"))?;
        Self::open_with(secret, ciphertext)
    }
}

impl fmt::Debug for AsymmetricCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricCipher")
            .field("has_private", &self.secret.is_some())
            .field("has_public", &self.public.is_some())
            .finish()
    }
}
