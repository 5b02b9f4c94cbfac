//! jab-core
//!
//! JAB tokens: records encoded as positional JSON value arrays, framed as
//! `JAB|<schema id>|[header values][payload]`, with an optional header
//! pipeline (checksum, null elision, compression, encryption, signature,
//! binary codecs, text safety) applied to the payload.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;
pub mod utils;

// Key model and identity hashing
pub mod crypto;

// Positional codec and header pipeline
pub mod codec;
pub mod headers;

// Token framing
pub mod parser;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{Layout, Positional, Record};
    pub use crate::config::{JabConfig, TextEncoding};
    pub use crate::crypto::{
        AsymmetricCipher, AsymmetricSigner, Cipher, CipherSuite, Keyring, MacSigner, Signer, SymmetricCipher,
    };
    pub use crate::headers::{HeaderChain, HeaderGroup, Stage};
    pub use crate::parser::{Decoded, Jab};
    pub use crate::types::{JabError, Result};
}
