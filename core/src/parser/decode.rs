//! parser/decode.rs
//! Token -> record (+ restored header).
//!
//! Order of checks:
//! 1. prefix and schema id; the id must match the requested pair;
//! 2. header values are loaded into the supplied chain;
//! 3. the chain undoes its byte transforms, last stage first;
//! 4. the record is rebuilt from the positional payload;
//! 5. the chain validates the rebuilt record, last stage first.

use crate::codec::values::parse_array;
use crate::codec::{record_from, schema_id, Positional, Record};
use crate::crypto::Keyring;
use crate::headers::Stage;
use crate::parser::token::{payload_body, split, split_header};
use crate::types::{JabError, Result};
use crate::utils::wrap;

pub(crate) fn decode_token<P: Record>(
    token: &[u8],
    header: Option<&mut dyn Stage>,
    keyring: &Keyring,
) -> Result<P> {
    let (token_id, framed) = split(token)?;
    let format_id = schema_id(header.as_deref().map(|h| h.type_name()), P::type_name());
    if token_id != format_id {
        tracing::warn!(expected = format_id, actual = token_id, payload = P::type_name(), "format id mismatch");
        return Err(JabError::SchemaMismatch { expected: format_id, actual: token_id });
    }

    let Some(header) = header else {
        let record = read_record::<P>(payload_body(framed)?)?;
        tracing::debug!(format_id, payload = P::type_name(), "decoded token");
        return Ok(record);
    };

    let (header_values, rest) = split_header(framed)?;
    header.load_header(header_values)?;
    let body = header.deobfuscate(payload_body(rest)?.to_vec(), keyring)?;

    let record = read_record::<P>(&body)?;
    header.validate(&Positional::of(&record)?, keyring)?;

    tracing::debug!(format_id, header = header.type_name(), payload = P::type_name(), "decoded token");
    Ok(record)
}

/// Rebuild a record from the (unwrapped) positional payload body.
fn read_record<P: Record>(body: &[u8]) -> Result<P> {
    let body = std::str::from_utf8(body)
        .map_err(|e| JabError::format_with("payload is not UTF-8 JSON text", e))?;
    record_from(parse_array(&wrap(body))?)
}
