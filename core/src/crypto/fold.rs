//! crypto/fold.rs
//! Deterministic length-changing XOR fold.
//!
//! Design:
//! - Result starts zeroed; walk `max(src_len, dst_len)` steps, XOR-ing the
//!   current source byte into the current result byte, both cursors wrapping.
//! - Shorter sources repeat with XOR rather than zero-pad; longer sources
//!   fold back over the result.
//!
//! Used to shrink digests into identity hashes and to stretch/shrink keys into IVs.

/// Fold `src` into exactly `dst_len` bytes.
///
/// An empty `src` or a zero `dst_len` yields an all-zero (or empty) buffer.
pub fn fold(src: &[u8], dst_len: usize) -> Vec<u8> {
    let mut dst = vec![0u8; dst_len];
    if src.is_empty() || dst_len == 0 {
        return dst;
    }

    let steps = src.len().max(dst_len);
    for step in 0..steps {
        dst[step % dst_len] ^= src[step % src.len()];
    }
    dst
}

/// Fixed-size variant for callers that need an array (IVs, hash folds).
pub fn fold_array<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&fold(src, N));
    out
}
