//! headers/to_string.rs
//! Binary payload <-> printable text. Belongs last in a chain whose earlier
//! stages produce raw bytes (compression, encryption, binary codecs).

use crate::config::TextEncoding;
use crate::crypto::Keyring;
use crate::headers::types::Stage;
use crate::types::Result;
use crate::utils::{bytes_to_text, text_to_bytes};

#[derive(Clone, Copy, Debug, Default)]
pub struct StringSafe {
    encoding: TextEncoding,
}

impl StringSafe {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

impl Stage for StringSafe {
    fn type_name(&self) -> &str {
        "StringSafe"
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        Ok(bytes_to_text(&payload, self.encoding).into_bytes())
    }

    fn deobfuscate(&self, payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
        text_to_bytes(&payload, self.encoding)
    }
}
