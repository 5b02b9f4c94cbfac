//! parser/mod.rs
//! `Jab`: the token parser context.
//!
//! A `Jab` owns its config, the keyring consulted while decoding and the
//! format registry used by `decode_any`. Nothing here is process-global; share
//! one instance (it is `Send + Sync`) or hand the same `Arc<Keyring>` to several.

pub mod token;
pub mod formats;
pub mod encode;
pub mod decode;

use std::sync::Arc;

pub use formats::{Decoded, FormatRegistry, JabFormat};
pub use token::{find_format_id, is_possible_jab};

use crate::codec::Record;
use crate::config::JabConfig;
use crate::crypto::Keyring;
use crate::headers::{HeaderChain, HeaderGroup, Stage};
use crate::types::{JabError, Result};

pub struct Jab {
    config: JabConfig,
    keyring: Arc<Keyring>,
    formats: FormatRegistry,
}

impl Default for Jab {
    fn default() -> Self {
        Self::new()
    }
}

impl Jab {
    pub fn new() -> Self {
        Self::with_keyring(JabConfig::default(), Arc::new(Keyring::new()))
    }

    pub fn with_config(config: JabConfig) -> Self {
        Self::with_keyring(config, Arc::new(Keyring::new()))
    }

    pub fn with_keyring(config: JabConfig, keyring: Arc<Keyring>) -> Self {
        Self { config, keyring, formats: FormatRegistry::new() }
    }

    pub fn config(&self) -> &JabConfig {
        &self.config
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Keyless chain for a preset group under this parser's config.
    pub fn group(&self, group: HeaderGroup) -> HeaderChain {
        group.chain(&self.config)
    }

    pub fn is_possible_jab(&self, token: &str) -> bool {
        is_possible_jab(token)
    }

    pub fn find_format_id(&self, token: &str) -> Option<u64> {
        find_format_id(token)
    }

    /// Encode `payload` to a text token, running `header` over it first.
    ///
    /// # Errors
    /// - `JabError::State` if a stage misses its cipher or signer.
    /// - `JabError::Format` if the transformed payload is not text (no StringSafe stage).
    pub fn encode<P: Record>(&self, header: Option<&mut dyn Stage>, payload: &P) -> Result<String> {
        encode::encode_text(header, payload)
    }

    /// Byte token: same framing, raw transformed payload between the final brackets.
    pub fn encode_bytes<P: Record>(&self, header: Option<&mut dyn Stage>, payload: &P) -> Result<Vec<u8>> {
        encode::encode_bytes(header, payload)
    }

    /// Decode a text token into `P`. The header, if given, must be a chain of
    /// the type the token was encoded with; it may be reused, since every header
    /// slot is reloaded from the token. It holds the token's header fields afterwards.
    pub fn decode<P: Record>(&self, token: &str, header: Option<&mut dyn Stage>) -> Result<P> {
        decode::decode_token(token.as_bytes(), header, &self.keyring)
    }

    pub fn decode_bytes<P: Record>(&self, token: &[u8], header: Option<&mut dyn Stage>) -> Result<P> {
        decode::decode_token(token, header, &self.keyring)
    }

    /// Decode a token whose format was registered in [`Jab::formats`].
    ///
    /// # Errors
    /// - `JabError::Format` if no format id can be read from the token.
    /// - `JabError::UnregisteredSchema` if the id is unknown.
    pub fn decode_any(&self, token: &str) -> Result<Decoded> {
        let id = find_format_id(token).ok_or_else(|| JabError::format("unrecognized format"))?;
        let Some(format) = self.formats.find(id) else {
            tracing::warn!(format_id = id, "unregistered format id");
            return Err(JabError::UnregisteredSchema(id));
        };
        format.decode(token.as_bytes(), &self.keyring)
    }

    /// Field-name layout of the token for `P` under `header`.
    pub fn describe<P: Record>(&self, header: Option<&dyn Stage>) -> Result<String> {
        encode::describe::<P>(header)
    }
}
