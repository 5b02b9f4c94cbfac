// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! Key derivation: passphrase keys (PBKDF2) and sealed-box session keys (HKDF).
//!
//! Design:
//! - PBKDF2-HMAC-SHA256(passphrase, salt, iterations) -> 32 bytes, then folded
//!   to the algorithm's key length.
//! - Missing salt falls back to the passphrase itself, so the same passphrase
//!   always yields the same key (and key id) on both ends.
//! - HKDF-Extract(shared_secret, salt) / HKDF-Expand(PRK, info) for the
//!   ephemeral X25519 exchange in `seal.rs`.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::KdfParams;
use crate::constants::{KDF_OUTPUT_LEN, SYMMETRIC_KEY_LEN};
use crate::crypto::fold::fold;
use crate::crypto::types::CryptoError;

/// HKDF 'info' binding sealed-box keys to this token format.
const SEAL_INFO: &[u8] = b"JAB|SEAL|X25519";

/// Derive `key_len` bytes from a passphrase.
///
/// Errors:
/// - `CryptoError::Kdf` for an empty passphrase or zero iterations.
pub fn derive_passphrase_key(
    passphrase: &str,
    salt: Option<&str>,
    key_len: usize,
    params: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if passphrase.is_empty() {
        return Err(CryptoError::Kdf("passphrase must not be empty".into()));
    }
    if params.iterations == 0 {
        return Err(CryptoError::Kdf("iterations must be > 0".into()));
    }

    let salt = salt.filter(|s| !s.is_empty()).unwrap_or(passphrase);

    let mut derived = Zeroizing::new([0u8; KDF_OUTPUT_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        derived.as_mut(),
    );

    Ok(Zeroizing::new(fold(derived.as_ref(), key_len)))
}

/// Derive the 32-byte sealing key from an X25519 shared secret.
/// `salt` binds both public keys (ephemeral || recipient).
pub fn derive_seal_key(
    shared_secret: &[u8],
    salt: &[u8],
) -> Result<Zeroizing<[u8; SYMMETRIC_KEY_LEN]>, CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), shared_secret);
    let mut key = Zeroizing::new([0u8; SYMMETRIC_KEY_LEN]);
    hk.expand(SEAL_INFO, key.as_mut())
        .map_err(|_| CryptoError::Kdf("HKDF expand failed (SHA-256)".into()))?;
    Ok(key)
}
