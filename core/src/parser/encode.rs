//! parser/encode.rs
//! Record (+ optional header) -> token.

use crate::codec::values::render;
use crate::codec::{schema_id, Positional, Record};
use crate::constants::{DELIMITER, PREFIX};
use crate::headers::Stage;
use crate::types::{JabError, Result};
use crate::utils::unwrap;

/// Token text up to the payload, and the transformed payload body.
pub(crate) struct Encoded {
    pub head: String,
    pub body: Vec<u8>,
}

pub(crate) fn encode_parts<P: Record>(header: Option<&mut dyn Stage>, payload: &P) -> Result<Encoded> {
    let positional = Positional::of(payload)?;
    let format_id = schema_id(header.as_deref().map(|h| h.type_name()), P::type_name());

    let mut head = format!("{PREFIX}{DELIMITER}{format_id}{DELIMITER}");
    let mut body = unwrap(positional.json()).as_bytes().to_vec();

    if let Some(header) = header {
        header.populate(&positional)?;
        body = header.obfuscate(body)?;
        head.push_str(&render(&header.header_values()?)?);
    }

    tracing::debug!(
        format_id,
        payload = P::type_name(),
        body_len = body.len(),
        "encoded token"
    );
    Ok(Encoded { head, body })
}

pub(crate) fn encode_text<P: Record>(header: Option<&mut dyn Stage>, payload: &P) -> Result<String> {
    let Encoded { mut head, body } = encode_parts(header, payload)?;
    let body = String::from_utf8(body).map_err(|e| {
        JabError::format_with("payload bytes are not text; end the chain with a StringSafe stage", e)
    })?;
    head.reserve(body.len() + 2);
    head.push('[');
    head.push_str(&body);
    head.push(']');
    Ok(head)
}

pub(crate) fn encode_bytes<P: Record>(header: Option<&mut dyn Stage>, payload: &P) -> Result<Vec<u8>> {
    let Encoded { head, body } = encode_parts(header, payload)?;
    let mut out = Vec::with_capacity(head.len() + body.len() + 2);
    out.extend_from_slice(head.as_bytes());
    out.push(b'[');
    out.extend_from_slice(&body);
    out.push(b']');
    Ok(out)
}

/// Field-name schema: `JAB|format id|[header names][payload names]`.
pub(crate) fn describe<P: Record>(header: Option<&dyn Stage>) -> Result<String> {
    let mut out = format!("{PREFIX}{DELIMITER}format id{DELIMITER}");
    if let Some(header) = header {
        out.push_str(&names_json(header.header_field_names())?);
    }
    out.push_str(&names_json(P::layout().field_names())?);
    Ok(out)
}

fn names_json(names: Vec<String>) -> Result<String> {
    serde_json::to_string(&names).map_err(|e| JabError::format_with("render field names", e))
}
