//! Positional record codec: field ordering, value extraction/reconstruction, schema ids.

pub mod layout;
pub mod schema;
pub mod values;

pub use layout::{Field, FieldKind, Layout, LayoutBuilder, Record};
pub use schema::{schema_id, schema_id_for, schema_id_of};
pub use values::{record_from, record_from_json, values_json, values_of, Positional};
