//! headers/nulls.rs
//! Null elision: drop `null` slots from positional arrays and put them back.
//!
//! Rules (outside JSON string literals only):
//! - elide: a `null` between `[`/`,` and `,`/`]` is removed, except the sole
//!   element of `[null]`, which would otherwise read back as `[]`.
//! - restore: every empty slot between `[`/`,` and `,`/`]` gets a `null`,
//!   except `[]`.
//!
//! Compact JSON has no empty slots other than `[]`, so restore(elide(s)) == s.

use crate::crypto::Keyring;
use crate::headers::types::Stage;
use crate::types::Result;

#[derive(Clone, Copy, Debug, Default)]
pub struct NullElision;

impl NullElision {
    pub fn new() -> Self {
        Self
    }
}

/// Tracks whether a byte sits inside a JSON string literal.
#[derive(Default)]
struct Literals {
    in_string: bool,
    escaped: bool,
}

impl Literals {
    /// Feed one byte; true if it is structural (outside any literal).
    fn structural(&mut self, b: u8) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if b == b'\\' {
                self.escaped = true;
            } else if b == b'"' {
                self.in_string = false;
            }
            return false;
        }
        if b == b'"' {
            self.in_string = true;
            return false;
        }
        true
    }
}

fn opens_slot(b: u8) -> bool {
    matches!(b, b'[' | b',')
}

fn closes_slot(b: u8) -> bool {
    matches!(b, b',' | b']')
}

/// Remove elidable `null`s from a JSON array text.
pub fn elide_nulls(json: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(json.len());
    let mut literals = Literals::default();
    let mut i = 0;
    while i < json.len() {
        let b = json[i];
        if literals.structural(b) && b == b'n' && i > 0 && json[i..].starts_with(b"null") {
            let before = json[i - 1];
            if let Some(&after) = json.get(i + 4) {
                let sole = before == b'[' && after == b']';
                if opens_slot(before) && closes_slot(after) && !sole {
                    i += 4;
                    continue;
                }
            }
        }
        out.push(b);
        i += 1;
    }
    out
}

/// Put `null` back into every empty slot of a JSON array text.
pub fn restore_nulls(json: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(json.len() + json.len() / 2);
    let mut literals = Literals::default();
    for (i, &b) in json.iter().enumerate() {
        out.push(b);
        if !literals.structural(b) || !opens_slot(b) {
            continue;
        }
        if let Some(&next) = json.get(i + 1) {
            if closes_slot(next) && !(b == b'[' && next == b']') {
                out.extend_from_slice(b"null");
            }
        }
    }
    out
}

/// Apply `f` to the payload as a whole array (`[` payload `]`) and strip the brackets again.
fn as_array(payload: &[u8], f: fn(&[u8]) -> Vec<u8>) -> Vec<u8> {
    let mut wrapped = Vec::with_capacity(payload.len() + 2);
    wrapped.push(b'[');
    wrapped.extend_from_slice(payload);
    wrapped.push(b']');
    let mut out = f(&wrapped);
    out.pop();
    out.remove(0);
    out
}

impl Stage for NullElision {
    fn type_name(&self) -> &str {
        "NullElision"
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        Ok(as_array(&payload, elide_nulls))
    }

    fn deobfuscate(&self, payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
        Ok(as_array(&payload, restore_nulls))
    }
}
