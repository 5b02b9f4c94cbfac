use thiserror::Error;

use crate::crypto::CryptoError;

/// Boxed collaborator error kept as the `source` of a wrapped failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = JabError> = std::result::Result<T, E>;

/// Unified error covering token shape, schema resolution, integrity, keys and crypto.
/// - Every variant is terminal for the encode/decode call that raised it.
/// - Messages carry ids, lengths and stage names only, never key material.
#[derive(Debug, Error)]
pub enum JabError {
    /// Token or positional array does not have the expected shape.
    #[error("format error: {context}")]
    Format {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Token schema id does not match the requested header/payload pair.
    #[error("format id mismatch; expected {expected}, but got {actual}")]
    SchemaMismatch { expected: u64, actual: u64 },

    /// Schema id is not registered in the format registry.
    #[error("unregistered format id: {0}")]
    UnregisteredSchema(u64),

    /// Checksum or signature validation failed.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// No registered key or verifier carries this key id.
    #[error("not registered key id: {0}")]
    UnknownKey(u64),

    /// Underlying cipher, signature or derivation failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A key, cipher or signer was never configured.
    #[error("state error: {0}")]
    State(String),

    /// Digest computation was given invalid input.
    #[error("hash error: {0}")]
    Hash(String),
}

impl JabError {
    pub fn format(context: impl Into<String>) -> Self {
        JabError::Format { context: context.into(), source: None }
    }

    /// Wrap a collaborator failure with the stage or field it happened in.
    pub fn format_with<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        JabError::Format { context: context.into(), source: Some(Box::new(source)) }
    }

    pub fn state(msg: impl Into<String>) -> Self {
        JabError::State(msg.into())
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        JabError::Integrity(msg.into())
    }
}
