//! parser/formats.rs
//! Format registry: schema id -> (header factory, payload type), for decoding
//! tokens whose type is not known up front.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::codec::{schema_id, Record};
use crate::crypto::Keyring;
use crate::headers::{HeaderChain, Stage};
use crate::parser::decode::decode_token;
use crate::types::Result;

type HeaderFactory = Arc<dyn Fn() -> HeaderChain + Send + Sync>;
type ErasedDecode = fn(&[u8], Option<&mut dyn Stage>, &Keyring) -> Result<Box<dyn Any + Send>>;

/// One registered (header, payload) pair.
pub struct JabFormat {
    id: u64,
    header_name: Option<String>,
    payload_name: &'static str,
    header: Option<HeaderFactory>,
    decode: ErasedDecode,
}

impl JabFormat {
    fn new<P: Record + Send + 'static>(header: Option<HeaderFactory>) -> Self {
        let header_name = header.as_ref().map(|factory| factory().name().to_string());
        Self {
            id: schema_id(header_name.as_deref(), P::type_name()),
            header_name,
            payload_name: P::type_name(),
            header,
            decode: erased_decode::<P>,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn header_name(&self) -> Option<&str> {
        self.header_name.as_deref()
    }

    pub fn payload_name(&self) -> &'static str {
        self.payload_name
    }

    /// Fresh header chain for one decode.
    pub fn header(&self) -> Option<HeaderChain> {
        self.header.as_ref().map(|factory| factory())
    }

    pub(crate) fn decode(&self, token: &[u8], keyring: &Keyring) -> Result<Decoded> {
        let mut header = self.header();
        let payload = (self.decode)(token, header.as_mut().map(|h| h as &mut dyn Stage), keyring)?;
        Ok(Decoded { format_id: self.id, type_name: self.payload_name, payload })
    }
}

impl fmt::Debug for JabFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JabFormat")
            .field("id", &self.id)
            .field("header_name", &self.header_name)
            .field("payload_name", &self.payload_name)
            .finish()
    }
}

fn erased_decode<P: Record + Send + 'static>(
    token: &[u8],
    header: Option<&mut dyn Stage>,
    keyring: &Keyring,
) -> Result<Box<dyn Any + Send>> {
    let payload: P = decode_token(token, header, keyring)?;
    Ok(Box::new(payload))
}

/// Payload of a registry-resolved decode.
pub struct Decoded {
    format_id: u64,
    type_name: &'static str,
    payload: Box<dyn Any + Send>,
}

impl Decoded {
    pub fn format_id(&self) -> u64 {
        self.format_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<P: Any>(&self) -> bool {
        self.payload.is::<P>()
    }

    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    /// Take the payload as `P`; gives `self` back if the type differs.
    pub fn downcast<P: Any>(self) -> std::result::Result<P, Self> {
        let Decoded { format_id, type_name, payload } = self;
        payload
            .downcast::<P>()
            .map(|p| *p)
            .map_err(|payload| Decoded { format_id, type_name, payload })
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoded")
            .field("format_id", &self.format_id)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct FormatRegistry {
    formats: RwLock<HashMap<u64, Arc<JabFormat>>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a headerless payload type; returns its schema id.
    pub fn register<P: Record + Send + 'static>(&self) -> u64 {
        self.insert(JabFormat::new::<P>(None))
    }

    /// Register a payload type under the chain produced by `header`.
    pub fn register_with_header<P, F>(&self, header: F) -> u64
    where
        P: Record + Send + 'static,
        F: Fn() -> HeaderChain + Send + Sync + 'static,
    {
        self.insert(JabFormat::new::<P>(Some(Arc::new(header))))
    }

    pub fn unregister(&self, id: u64) -> bool {
        let removed = self.formats.write().remove(&id).is_some();
        if removed {
            tracing::debug!(format_id = id, "format unregistered");
        }
        removed
    }

    pub fn find(&self, id: u64) -> Option<Arc<JabFormat>> {
        self.formats.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.formats.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.read().is_empty()
    }

    fn insert(&self, format: JabFormat) -> u64 {
        let id = format.id;
        tracing::debug!(
            format_id = id,
            header = format.header_name.as_deref().unwrap_or("-"),
            payload = format.payload_name,
            "format registered"
        );
        self.formats.write().insert(id, Arc::new(format));
        id
    }
}
