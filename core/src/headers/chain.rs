//! headers/chain.rs
//! Ordered composite of stages; itself a stage.
//!
//! Two orders are in play:
//! - pipeline order (insertion order): `populate`/`obfuscate` run forward,
//!   `validate`/`deobfuscate` run in reverse, so stage N is undone before stage N-1;
//! - header order: stages that carry header fields are laid out sorted by
//!   their entry name, each as one nested positional array.

use serde_json::Value;

use crate::codec::Positional;
use crate::crypto::Keyring;
use crate::headers::types::Stage;
use crate::types::{JabError, Result};

struct Entry {
    name: String,
    stage: Box<dyn Stage>,
}

pub struct HeaderChain {
    name: String,
    entries: Vec<Entry>,
}

impl HeaderChain {
    /// `name` is the header type name that goes into the schema id.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    /// Append a stage at the end of the pipeline.
    pub fn with(mut self, name: impl Into<String>, stage: impl Stage + 'static) -> Self {
        self.push(name, Box::new(stage));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, stage: Box<dyn Stage>) {
        self.entries.push(Entry { name: name.into(), stage });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in pipeline order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn stage(&self, name: &str) -> Option<&dyn Stage> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.stage.as_ref())
    }

    /// Indices of header-carrying entries, sorted by entry name.
    fn header_slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.entries[i].stage.has_header())
            .collect();
        slots.sort_by(|&a, &b| self.entries[a].name.cmp(&self.entries[b].name));
        slots
    }
}

impl Stage for HeaderChain {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn has_header(&self) -> bool {
        self.entries.iter().any(|e| e.stage.has_header())
    }

    fn header_values(&self) -> Result<Vec<Value>> {
        self.header_slots()
            .into_iter()
            .map(|i| self.entries[i].stage.header_values().map(Value::Array))
            .collect()
    }

    /// Slots the token leaves out (or sends as `null`) are reset, never kept from a previous use.
    fn load_header(&mut self, values: Vec<Value>) -> Result<()> {
        let mut values = values.into_iter();
        for i in self.header_slots() {
            let entry = &mut self.entries[i];
            match values.next().unwrap_or(Value::Null) {
                Value::Null => entry.stage.load_header(Vec::new())?,
                Value::Array(inner) => entry.stage.load_header(inner)?,
                _ => {
                    return Err(JabError::format(format!(
                        "header {}.{}: expected nested array",
                        self.name, entry.name
                    )))
                }
            }
        }
        Ok(())
    }

    fn header_field_names(&self) -> Vec<String> {
        self.header_slots()
            .into_iter()
            .map(|i| {
                let entry = &self.entries[i];
                format!("{}:[{}]", entry.name, entry.stage.header_field_names().join(","))
            })
            .collect()
    }

    fn populate(&mut self, payload: &Positional) -> Result<()> {
        for entry in self.entries.iter_mut() {
            entry.stage.populate(payload)?;
        }
        Ok(())
    }

    fn validate(&self, payload: &Positional, keyring: &Keyring) -> Result<()> {
        for entry in self.entries.iter().rev() {
            entry.stage.validate(payload, keyring)?;
        }
        Ok(())
    }

    fn obfuscate(&self, mut payload: Vec<u8>) -> Result<Vec<u8>> {
        for entry in &self.entries {
            payload = entry.stage.obfuscate(payload)?;
            tracing::trace!(chain = %self.name, stage = %entry.name, len = payload.len(), "obfuscated");
        }
        Ok(payload)
    }

    fn deobfuscate(&self, mut payload: Vec<u8>, keyring: &Keyring) -> Result<Vec<u8>> {
        for entry in self.entries.iter().rev() {
            payload = entry.stage.deobfuscate(payload, keyring)?;
            tracing::trace!(chain = %self.name, stage = %entry.name, len = payload.len(), "deobfuscated");
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for HeaderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderChain")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .finish()
    }
}
