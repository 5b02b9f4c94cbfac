//! codec/schema.rs
//! Schema identity of a (header type, payload type) pair.
//!
//! The id hashes the header type name (if any) followed by the payload type
//! name. Different pairs may collide; the id identifies, it does not authenticate.

use crate::codec::layout::Record;
use crate::crypto::hash_str;
use crate::headers::Stage;

pub fn schema_id(header_type: Option<&str>, payload_type: &str) -> u64 {
    let mut name = String::with_capacity(header_type.map_or(0, str::len) + payload_type.len());
    if let Some(header_type) = header_type {
        name.push_str(header_type);
    }
    name.push_str(payload_type);
    hash_str(&name)
}

/// Schema id for payload type `P` under an optional header.
pub fn schema_id_for<P: Record>(header: Option<&dyn Stage>) -> u64 {
    schema_id(header.map(|h| h.type_name()), P::type_name())
}

/// Schema id from concrete instances.
pub fn schema_id_of<P: Record>(header: Option<&dyn Stage>, _payload: &P) -> u64 {
    schema_id_for::<P>(header)
}
