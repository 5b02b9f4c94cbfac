use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::config::TextEncoding;
use crate::types::{JabError, Result};

/// Wrap in `[`, `]`.
pub fn wrap(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('[');
    out.push_str(s);
    out.push(']');
    out
}

/// Trim off `[`, `]` if previously wrapped; otherwise return as is.
pub fn unwrap(s: &str) -> &str {
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => inner,
        None => s,
    }
}

/// Convert arbitrary bytes to printable text.
pub fn bytes_to_text(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Standard => STANDARD.encode(bytes),
        TextEncoding::UrlSafe => URL_SAFE_NO_PAD.encode(bytes),
    }
}

/// Inverse of [`bytes_to_text`].
pub fn text_to_bytes(text: &[u8], encoding: TextEncoding) -> Result<Vec<u8>> {
    let decoded = match encoding {
        TextEncoding::Standard => STANDARD.decode(text),
        TextEncoding::UrlSafe => URL_SAFE_NO_PAD.decode(text),
    };
    decoded.map_err(|e| JabError::format_with("text payload is not valid base64", e))
}
