// ## 📂 File: `src/crypto/nonce.rs`

//! crypto/nonce.rs
//! Deterministic IV derivation from key bytes.
//!
//! Design:
//! - IV = fold(key_bytes, iv_len). The IV is never transmitted; both ends
//!   recompute it from the key they hold.
//!
//! Security notes:
//! - Identical plaintext under the same symmetric key yields identical
//!   ciphertext. Token compatibility depends on this schedule; do not switch
//!   to random IVs without versioning the format.
//! - Sealed boxes (`seal.rs`) derive a fresh key per message, so the same
//!   schedule gives them a unique IV per message.

use crate::constants::IV_LEN_12;
use crate::crypto::fold::fold_array;
use crate::crypto::types::CryptoError;

/// Derive a 12-byte IV from key bytes.
#[inline]
pub fn derive_iv_12(key: &[u8]) -> Result<[u8; IV_LEN_12], CryptoError> {
    if key.is_empty() {
        return Err(CryptoError::MissingKey("cipher key"));
    }
    Ok(fold_array::<IV_LEN_12>(key))
}
