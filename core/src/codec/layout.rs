//! codec/layout.rs
//! Field ordering for positional records.
//!
//! Ordering rule:
//! - Fields declared at one level are sorted by name.
//! - Inherited (`extends`) fields come before the type's own fields.
//! - The order is never written into a token; encoder and decoder must build
//!   the same layout for the same type.
//!
//! Every field is classified up front: `Scalar` for numbers, text, booleans,
//! byte sequences and collections of those; `Record`/`List`/`Map` when the
//! element type is itself a record and must be encoded positionally.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A type that can be encoded positionally.
///
/// Field names in the layout must match the serde names of the type.
/// Only `Option` and `#[serde(default)]` fields may be left out of a shorter
/// encoding; a missing required field fails to decode with a `FormatError`.
pub trait Record: Serialize + DeserializeOwned {
    /// Short type name; part of the schema id.
    fn type_name() -> &'static str;

    fn layout() -> Layout;
}

/// Declared element kind of a field.
#[derive(Copy, Clone)]
pub enum FieldKind {
    /// Primitive-like value, or an array/list/map of them. Emitted as is.
    Scalar,
    /// Nested record, emitted as its own positional array.
    Record(fn() -> Layout),
    /// Array or list of records, emitted as an array of positional arrays.
    List(fn() -> Layout),
    /// String-keyed map of records, emitted as an object of positional arrays.
    Map(fn() -> Layout),
}

impl FieldKind {
    pub fn is_composite(&self) -> bool {
        !matches!(self, FieldKind::Scalar)
    }

    pub(crate) fn nested_layout(&self) -> Option<Layout> {
        match self {
            FieldKind::Scalar => None,
            FieldKind::Record(f) | FieldKind::List(f) | FieldKind::Map(f) => Some(f()),
        }
    }
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldKind::Scalar => "Scalar",
            FieldKind::Record(_) => "Record",
            FieldKind::List(_) => "List",
            FieldKind::Map(_) => "Map",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Ordered field list of one record type.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in positional order; nested records render as `name:[child,...]`.
    pub fn field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| match field.kind.nested_layout() {
                None => field.name.to_string(),
                Some(nested) => format!("{}:[{}]", field.name, nested.field_names().join(",")),
            })
            .collect()
    }
}

#[derive(Default)]
pub struct LayoutBuilder {
    inherited: Vec<Field>,
    own: Vec<Field>,
}

impl LayoutBuilder {
    /// Place every field of `parent` before this level's own fields.
    pub fn extends(mut self, parent: Layout) -> Self {
        self.inherited.extend(parent.fields);
        self
    }

    pub fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.own.push(Field { name, kind });
        self
    }

    pub fn scalar(self, name: &'static str) -> Self {
        self.field(name, FieldKind::Scalar)
    }

    pub fn record<R: Record>(self, name: &'static str) -> Self {
        self.field(name, FieldKind::Record(R::layout))
    }

    pub fn list<R: Record>(self, name: &'static str) -> Self {
        self.field(name, FieldKind::List(R::layout))
    }

    pub fn map<R: Record>(self, name: &'static str) -> Self {
        self.field(name, FieldKind::Map(R::layout))
    }

    pub fn build(self) -> Layout {
        let LayoutBuilder { mut inherited, mut own } = self;
        own.sort_by(|a, b| a.name.cmp(b.name));
        debug_assert!(
            own.windows(2).all(|w| w[0].name != w[1].name),
            "duplicate field name in one layout level"
        );
        inherited.extend(own);
        Layout { fields: inherited }
    }
}
