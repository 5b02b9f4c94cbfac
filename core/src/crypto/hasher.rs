//! crypto/hasher.rs
//! 53-bit identity hash shared by schema ids, key ids and payload checksums.
//!
//! Design:
//! - SHA-256 over the concatenated parts, folded to 8 bytes.
//! - Big-endian signed 64-bit value, absolute value, reduced modulo 2^53 - 1
//!   so the id survives a round trip through any JSON number.

use sha2::{Digest, Sha256};

use crate::constants::{HASH_FOLD_LEN, MAX_SAFE_INTEGER};
use crate::crypto::fold::fold_array;
use crate::types::{JabError, Result};

/// Hash one or more byte sequences into a 53-bit identity.
///
/// # Errors
/// - `JabError::Hash` if no parts are supplied.
pub fn hash(parts: &[&[u8]]) -> Result<u64> {
    if parts.is_empty() {
        return Err(JabError::Hash("at least one data part is required".into()));
    }

    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Ok(reduce(&hasher.finalize()))
}

/// Hash a UTF-8 string. Never fails.
pub fn hash_str(data: &str) -> u64 {
    reduce(&Sha256::digest(data.as_bytes()))
}

fn reduce(digest: &[u8]) -> u64 {
    let folded: [u8; HASH_FOLD_LEN] = fold_array(digest);
    let signed = i64::from_be_bytes(folded);
    signed.unsigned_abs() % MAX_SAFE_INTEGER
}
