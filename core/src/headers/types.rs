//! headers/types.rs
//! The `Stage` contract shared by every header step and by `HeaderChain`.
//!
//! Lifecycle per token:
//! - encode: `populate` (derive metadata from the payload record), then
//!   `obfuscate` (forward byte transform), then `header_values` (stage fields).
//! - decode: `load_header` (stage fields), then `deobfuscate` (inverse byte
//!   transform), then `validate` against the rebuilt payload record.
//!
//! Every method has a no-op default, so transform-only stages implement just
//! the byte methods and metadata-only stages implement just populate/validate.

use serde_json::Value;

use crate::codec::{record_from, values_of, Positional, Record};
use crate::crypto::Keyring;
use crate::types::Result;

pub trait Stage: Send + Sync {
    /// Short type name; a chain's name takes part in the schema id.
    fn type_name(&self) -> &str;

    /// Whether this stage carries fields in the token header.
    fn has_header(&self) -> bool {
        false
    }

    /// Positional header fields.
    fn header_values(&self) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    /// Restore header fields read from a token.
    fn load_header(&mut self, _values: Vec<Value>) -> Result<()> {
        Ok(())
    }

    /// Header field names, positional order; used by schema descriptions.
    fn header_field_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Derive and store metadata from the payload before any byte transform.
    fn populate(&mut self, _payload: &Positional) -> Result<()> {
        Ok(())
    }

    /// Recompute metadata from the rebuilt payload and compare.
    fn validate(&self, _payload: &Positional, _keyring: &Keyring) -> Result<()> {
        Ok(())
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        Ok(payload)
    }

    fn deobfuscate(&self, payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
        Ok(payload)
    }
}

/// Header values of a stage whose fields are a [`Record`].
pub(crate) fn record_header<R: Record>(stage: &R) -> Result<Vec<Value>> {
    values_of(stage)
}

/// Rebuild the record part of a stage from header values.
pub(crate) fn load_record<R: Record>(values: Vec<Value>) -> Result<R> {
    record_from(values)
}

pub(crate) fn record_field_names<R: Record>() -> Vec<String> {
    R::layout().field_names()
}
