//! parser/token.rs
//! Token framing: `JAB|<schema id>|[header values][payload]`.
//!
//! Matching is done by hand and accepts exactly what
//! `^JAB\|\d+\|(?:\[.*\])?\[.*\]$` accepts on a single line.

use serde_json::Value;

use crate::constants::{DELIMITER, PREFIX};
use crate::types::{JabError, Result};

/// Quick shape check; true means decoding may be attempted.
pub fn is_possible_jab(token: &str) -> bool {
    if token.contains(['\n', '\r']) {
        return false;
    }
    let Some(rest) = strip_prefix(token.as_bytes()) else {
        return false;
    };
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let Some(framed) = rest[digits..].strip_prefix(DELIMITER.as_bytes()) else {
        return false;
    };
    framed.len() >= 2 && framed.starts_with(b"[") && framed.ends_with(b"]")
}

/// Schema id of a token; `None` for anything malformed.
pub fn find_format_id(token: &str) -> Option<u64> {
    if !is_possible_jab(token) {
        return None;
    }
    split(token.as_bytes()).ok().map(|(id, _)| id)
}

fn strip_prefix(token: &[u8]) -> Option<&[u8]> {
    token.strip_prefix(PREFIX.as_bytes())?.strip_prefix(DELIMITER.as_bytes())
}

/// Split a token into its schema id and the bracketed remainder.
pub(crate) fn split(token: &[u8]) -> Result<(u64, &[u8])> {
    let rest = strip_prefix(token).ok_or_else(|| JabError::format("unrecognized prefix"))?;
    let end = rest
        .iter()
        .position(|&b| b == DELIMITER.as_bytes()[0])
        .filter(|&p| p > 0)
        .ok_or_else(|| JabError::format("unrecognized format; no format id"))?;
    let digits = &rest[..end];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(JabError::format("format id is not a non-negative integer"));
    }
    let id = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| JabError::format("format id out of range"))?;
    Ok((id, &rest[end + 1..]))
}

/// Read the header value array off the front of `framed`; returns it with the remainder.
pub(crate) fn split_header(framed: &[u8]) -> Result<(Vec<Value>, &[u8])> {
    let mut stream = serde_json::Deserializer::from_slice(framed).into_iter::<Value>();
    let header = match stream.next() {
        Some(Ok(Value::Array(values))) => values,
        Some(Ok(_)) | None => return Err(JabError::format("bad format; can not parse header")),
        Some(Err(e)) => return Err(JabError::format_with("bad format; can not parse header", e)),
    };
    Ok((header, &framed[stream.byte_offset()..]))
}

/// Body of the final `[...]` pair.
pub(crate) fn payload_body(framed: &[u8]) -> Result<&[u8]> {
    framed
        .strip_prefix(b"[")
        .and_then(|rest| rest.strip_suffix(b"]"))
        .ok_or_else(|| JabError::format("bad format; payload must be wrapped in [ ]"))
}
