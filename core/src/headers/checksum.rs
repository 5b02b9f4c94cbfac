//! headers/checksum.rs
//! Payload checksum stored in the token header.
//!
//! The checksum is the 53-bit identity hash of the payload's positional JSON,
//! taken before any byte transform, so it is independent of the rest of the chain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{Layout, Positional, Record};
use crate::crypto::{hash_str, Keyring};
use crate::headers::types::{load_record, record_field_names, record_header, Stage};
use crate::types::{JabError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(default)]
    checksum: Option<u64>,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored checksum; `None` before `populate` or `load_header`.
    pub fn checksum(&self) -> Option<u64> {
        self.checksum
    }
}

impl Record for Checksum {
    fn type_name() -> &'static str {
        "Checksum"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("checksum").build()
    }
}

impl Stage for Checksum {
    fn type_name(&self) -> &str {
        <Self as Record>::type_name()
    }

    fn has_header(&self) -> bool {
        true
    }

    fn header_values(&self) -> Result<Vec<Value>> {
        record_header(self)
    }

    fn load_header(&mut self, values: Vec<Value>) -> Result<()> {
        *self = load_record(values)?;
        Ok(())
    }

    fn header_field_names(&self) -> Vec<String> {
        record_field_names::<Self>()
    }

    fn populate(&mut self, payload: &Positional) -> Result<()> {
        self.checksum = Some(hash_str(payload.json()));
        Ok(())
    }

    fn validate(&self, payload: &Positional, _keyring: &Keyring) -> Result<()> {
        let expected = self
            .checksum
            .ok_or_else(|| JabError::integrity("token carries no checksum"))?;
        let actual = hash_str(payload.json());
        if expected != actual {
            tracing::debug!(expected, actual, "checksum mismatch");
            return Err(JabError::Integrity(format!(
                "checksum mismatch; expected {expected}, but got {actual}"
            )));
        }
        Ok(())
    }
}
