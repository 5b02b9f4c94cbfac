//! headers/signature.rs
//! Signature over the payload's positional JSON, carried in the header.
//!
//! Header fields: the signer's key id and the text-encoded signature bytes.
//! Verification picks the verifier by key id from the keyring.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{Layout, Positional, Record};
use crate::config::TextEncoding;
use crate::crypto::{Keyring, Signer};
use crate::headers::types::{load_record, record_field_names, record_header, Stage};
use crate::types::{JabError, Result};
use crate::utils::{bytes_to_text, text_to_bytes};

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    key_id: Option<u64>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(skip)]
    signer: Option<Arc<dyn Signer>>,
    #[serde(skip)]
    encoding: TextEncoding,
}

impl Signature {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding, ..Self::default() }
    }

    pub fn with_signer(signer: Arc<dyn Signer>, encoding: TextEncoding) -> Self {
        Self { signer: Some(signer), encoding, ..Self::default() }
    }

    pub fn set_signer(&mut self, signer: Arc<dyn Signer>) {
        self.signer = Some(signer);
    }

    pub fn key_id(&self) -> Option<u64> {
        self.key_id
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

impl Record for Signature {
    fn type_name() -> &'static str {
        "Signature"
    }

    fn layout() -> Layout {
        Layout::builder().scalar("key_id").scalar("signature").build()
    }
}

impl Stage for Signature {
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
        let loaded: Signature = load_record(values)?;
        self.key_id = loaded.key_id;
        self.signature = loaded.signature;
        Ok(())
    }

    fn header_field_names(&self) -> Vec<String> {
        record_field_names::<Self>()
    }

    fn populate(&mut self, payload: &Positional) -> Result<()> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| JabError::state("signer has to be set first"))?;
        let key_id = signer.key_id()?;
        let signature = signer.sign(payload.json().as_bytes())?;
        self.key_id = Some(key_id);
        self.signature = Some(bytes_to_text(&signature, self.encoding));
        Ok(())
    }

    fn validate(&self, payload: &Positional, keyring: &Keyring) -> Result<()> {
        let key_id = self.key_id.ok_or_else(|| JabError::integrity("token carries no signer key id"))?;
        let signature = self
            .signature
            .as_deref()
            .ok_or_else(|| JabError::integrity("token carries no signature"))?;

        let Some(verifier) = keyring.verifiers().find(key_id) else {
            tracing::warn!(key_id, "no verifier registered for key id");
            return Err(JabError::UnknownKey(key_id));
        };

        let signature = text_to_bytes(signature.as_bytes(), self.encoding)
            .map_err(|_| JabError::integrity("signature is not valid text encoding"))?;
        if !verifier.verify(payload.json().as_bytes(), &signature)? {
            return Err(JabError::integrity("signature verification failed"));
        }
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("key_id", &self.key_id)
            .field("signature", &self.signature)
            .field("signer", &self.signer.as_ref().map(|s| s.algorithm()))
            .field("encoding", &self.encoding)
            .finish()
    }
}
