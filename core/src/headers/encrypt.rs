//! headers/encrypt.rs
//! Payload encryption stage.
//!
//! encode: the configured cipher's key id goes into the header and the payload
//! bytes are encrypted under it.
//! decode: the header key id selects a decrypt key from the keyring; the cipher
//! held by this instance (if any) is never used for decryption.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{Layout, Positional, Record};
use crate::crypto::{Cipher, Keyring};
use crate::headers::types::{load_record, record_field_names, record_header, Stage};
use crate::types::{JabError, Result};

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Crypto {
    #[serde(default)]
    key_id: Option<u64>,
    #[serde(skip)]
    cipher: Option<Arc<dyn Cipher>>,
}

impl Crypto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cipher(cipher: Arc<dyn Cipher>) -> Self {
        Self { key_id: None, cipher: Some(cipher) }
    }

    pub fn set_cipher(&mut self, cipher: Arc<dyn Cipher>) {
        self.cipher = Some(cipher);
    }

    pub fn key_id(&self) -> Option<u64> {
        self.key_id
    }

    fn cipher(&self) -> Result<&Arc<dyn Cipher>> {
        self.cipher
            .as_ref()
            .ok_or_else(|| JabError::state("encryption cipher has to be set first"))
    }
}

impl Record for Crypto {
    fn type_name() -> &'static str {
        "Crypto"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("key_id").build()
    }
}

impl Stage for Crypto {
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
        let loaded: Crypto = load_record(values)?;
        self.key_id = loaded.key_id;
        Ok(())
    }

    fn header_field_names(&self) -> Vec<String> {
        record_field_names::<Self>()
    }

    fn populate(&mut self, _payload: &Positional) -> Result<()> {
        let key_id = self.cipher()?.key_id()?;
        self.key_id = Some(key_id);
        Ok(())
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        Ok(self.cipher()?.encrypt(&payload)?)
    }

    fn deobfuscate(&self, payload: Vec<u8>, keyring: &Keyring) -> Result<Vec<u8>> {
        let key_id = self.key_id.ok_or_else(|| JabError::format("token carries no key id"))?;
        let Some(cipher) = keyring.keys().find(key_id) else {
            tracing::warn!(key_id, "no decrypt key registered for key id");
            return Err(JabError::UnknownKey(key_id));
        };
        Ok(cipher.decrypt(&payload)?)
    }
}

impl fmt::Debug for Crypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crypto")
            .field("key_id", &self.key_id)
            .field("cipher", &self.cipher.as_ref().map(|c| c.algorithm()))
            .finish()
    }
}
