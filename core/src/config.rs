//! config.rs
//! Tunables shared by key derivation and the transform stages.
//!
//! Notes:
//! - Every field has a default, so a partial JSON document is enough.
//! - Encoder and decoder must agree on `text_encoding` and `kdf`; the token does not carry them.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, DEFAULT_KDF_ITERATIONS, MAX_COMPRESSION_LEVEL};
use crate::types::{JabError, Result};

/// Text alphabet used to make binary payloads printable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// RFC 4648 base64 with padding.
    #[default]
    Standard,
    /// RFC 4648 URL-safe base64 without padding.
    UrlSafe,
}

/// Passphrase derivation parameters (PBKDF2-HMAC-SHA256).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self { iterations: DEFAULT_KDF_ITERATIONS }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JabConfig {
    pub kdf: KdfParams,
    /// Deflate level, 0..=9; `validate` rejects anything higher.
    pub compression_level: u32,
    pub text_encoding: TextEncoding,
}

impl Default for JabConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            text_encoding: TextEncoding::default(),
        }
    }
}

impl JabConfig {
    /// Parse a JSON config document, e.g. `{"kdf":{"iterations":1000}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: JabConfig = serde_json::from_str(json)
            .map_err(|e| JabError::format_with("config document", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kdf.iterations == 0 {
            return Err(JabError::format("kdf.iterations must be > 0"));
        }
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(JabError::format(format!(
                "compression_level must be 0..={MAX_COMPRESSION_LEVEL}, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }
}
