//! headers/binary.rs
//! Structured-binary re-encoding of the positional payload.
//!
//! The payload entering the stage is the JSON array body; the codec turns the
//! value list into its own bytes and back. The wire layout belongs to the
//! third-party format.
//!
//! - CBOR via ciborium
//! - MessagePack via rmp-serde
//! - BSON via bson: a document keyed "0", "1", ... in positional order

use std::marker::PhantomData;

use serde_json::Value;

use crate::codec::values::{parse_array, render};
use crate::crypto::Keyring;
use crate::headers::types::Stage;
use crate::types::{JabError, Result};
use crate::utils::{unwrap, wrap};

/// Value list <-> format bytes.
pub trait ValueCodec: Send + Sync + 'static {
    const NAME: &'static str;

    fn encode(values: &[Value]) -> Result<Vec<u8>>;

    fn decode(bytes: &[u8]) -> Result<Vec<Value>>;
}

pub struct CborCodec;

impl ValueCodec for CborCodec {
    const NAME: &'static str = "Cbor";

    fn encode(values: &[Value]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        ciborium::into_writer(&values, &mut out).map_err(|e| JabError::format_with("cbor encode", e))?;
        Ok(out)
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Value>> {
        ciborium::from_reader(bytes).map_err(|e| JabError::format_with("cbor decode", e))
    }
}

pub struct MessagePackCodec;

impl ValueCodec for MessagePackCodec {
    const NAME: &'static str = "MessagePack";

    fn encode(values: &[Value]) -> Result<Vec<u8>> {
        rmp_serde::to_vec(values).map_err(|e| JabError::format_with("msgpack encode", e))
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Value>> {
        rmp_serde::from_slice(bytes).map_err(|e| JabError::format_with("msgpack decode", e))
    }
}

pub struct BsonCodec;

impl ValueCodec for BsonCodec {
    const NAME: &'static str = "Bson";

    fn encode(values: &[Value]) -> Result<Vec<u8>> {
        let mut doc = bson::Document::new();
        for (idx, value) in values.iter().enumerate() {
            let value = bson::to_bson(value)
                .map_err(|e| JabError::format_with(format!("bson encode slot {idx}"), e))?;
            doc.insert(idx.to_string(), value);
        }
        bson::to_vec(&doc).map_err(|e| JabError::format_with("bson encode", e))
    }

    fn decode(bytes: &[u8]) -> Result<Vec<Value>> {
        let doc: bson::Document = bson::from_slice(bytes).map_err(|e| JabError::format_with("bson decode", e))?;
        // documents keep insertion order, which is positional order
        Ok(doc.into_iter().map(|(_, value)| value.into_relaxed_extjson()).collect())
    }
}

/// Stage wrapping one [`ValueCodec`].
pub struct BinaryStage<C> {
    _codec: PhantomData<fn() -> C>,
}

impl<C: ValueCodec> BinaryStage<C> {
    pub fn new() -> Self {
        Self { _codec: PhantomData }
    }
}

impl<C: ValueCodec> Default for BinaryStage<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for BinaryStage<C> {
    fn clone(&self) -> Self {
        Self { _codec: PhantomData }
    }
}

impl<C: ValueCodec> std::fmt::Debug for BinaryStage<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryStage").field("codec", &C::NAME).finish()
    }
}

impl<C: ValueCodec> Stage for BinaryStage<C> {
    fn type_name(&self) -> &str {
        C::NAME
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        let text = std::str::from_utf8(&payload)
            .map_err(|e| JabError::format_with(format!("{}: payload is not JSON text", C::NAME), e))?;
        let values = parse_array(&wrap(text))?;
        C::encode(&values)
    }

    fn deobfuscate(&self, payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
        let values = C::decode(&payload)?;
        let json = render(&values)?;
        Ok(unwrap(&json).as_bytes().to_vec())
    }
}

pub type Cbor = BinaryStage<CborCodec>;
pub type MessagePack = BinaryStage<MessagePackCodec>;
pub type Bson = BinaryStage<BsonCodec>;
