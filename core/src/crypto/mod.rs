pub mod types;
pub mod fold;
pub mod hasher;
pub mod kdf;
pub mod nonce;
pub mod key;
pub mod aead;
pub mod seal;
pub mod signer;
pub mod registry;

pub use types::*;
pub use fold::*;
pub use hasher::*;
pub use key::*;
pub use aead::*;
pub use seal::*;
pub use signer::*;
pub use registry::*;
