//! headers/mod.rs
//! Header pipeline: the `Stage` contract, the `HeaderChain` composite, the
//! canonical stages and the preset groups.

pub mod types;
pub mod chain;
pub mod checksum;
pub mod nulls;
pub mod compress;
pub mod to_string;
pub mod encrypt;
pub mod signature;
pub mod binary;
pub mod groups;

pub use types::Stage;
pub use chain::HeaderChain;
pub use checksum::Checksum;
pub use nulls::{elide_nulls, restore_nulls, NullElision};
pub use compress::Compress;
pub use to_string::StringSafe;
pub use encrypt::Crypto;
pub use signature::Signature;
pub use binary::{BinaryStage, Bson, BsonCodec, Cbor, CborCodec, MessagePack, MessagePackCodec, ValueCodec};
pub use groups::HeaderGroup;
