//! Record descriptors.
//!
//! A [`RecordType`] is the build-time description of one record: its fields
//! in declaration order, the raw annotation strings attached to each, and for
//! fields whose type is itself a record, a function producing the nested
//! descriptor. `#[derive(Record)]` generates these; they can also be written
//! by hand.
//!
//! ```rust
//! use tagtable::{FieldDef, RecordType};
//!
//! fn stats() -> RecordType {
//!     RecordType::new("Stats")
//!         .field(FieldDef::new("cpu").tag("title", "CPU"))
//!         .field(FieldDef::new("mem").tag("title", "Mem"))
//! }
//!
//! let node = RecordType::new("Node")
//!     .field(FieldDef::new("name"))
//!     .field(FieldDef::new("stats").tag("group", "Resources").nested(stats));
//!
//! assert_eq!(node.fields.len(), 2);
//! assert!(node.fields[1].is_nested());
//! ```

use std::collections::BTreeMap;

/// Tag holding the display title of a column.
pub const TITLE_TAG: &str = "title";
/// Tag holding the text shown for empty cells.
pub const DEFAULT_TAG: &str = "def";
/// Tag naming the formatter applied to a column.
pub const FORMAT_TAG: &str = "format";
/// Tag marking a nested record as a column group.
pub const GROUP_TAG: &str = "group";

/// Build-time description of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    /// Type name, used in diagnostics and recursion checks.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl RecordType {
    /// Creates a descriptor with no fields.
    pub fn new(name: &'static str) -> Self {
        RecordType {
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }
}

/// One field of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Lookup key of the field within its serialized record.
    pub key: String,
    /// Raw annotation strings by tag name.
    pub tags: BTreeMap<String, String>,
    /// Descriptor of the field's type when it is itself a record.
    pub nested: Option<fn() -> RecordType>,
}

impl FieldDef {
    /// Creates a plain field with no tags.
    pub fn new(key: impl Into<String>) -> Self {
        FieldDef {
            key: key.into(),
            tags: BTreeMap::new(),
            nested: None,
        }
    }

    /// Attaches a raw annotation.
    pub fn tag(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.tags.insert(name.into(), raw.into());
        self
    }

    /// Marks the field's type as a nested record.
    pub fn nested(mut self, record_type: fn() -> RecordType) -> Self {
        self.nested = Some(record_type);
        self
    }

    /// Raw annotation for `name`; a missing tag reads as empty.
    pub fn tag_value(&self, name: &str) -> &str {
        self.tags.get(name).map(String::as_str).unwrap_or("")
    }

    /// Whether the field's type is a nested record.
    pub fn is_nested(&self) -> bool {
        self.nested.is_some()
    }

    /// A group field is a nested record carrying a `group` tag and no
    /// `format` tag. Its children become columns; the field itself does not.
    pub fn is_group(&self) -> bool {
        self.is_nested()
            && !self.tag_value(GROUP_TAG).is_empty()
            && self.tag_value(FORMAT_TAG).is_empty()
    }
}
