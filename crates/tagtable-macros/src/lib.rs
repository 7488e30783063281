//! Proc macros for tagtable.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate a `tagtable::RecordType` descriptor from struct
//!   field annotations
//!
//! For working examples, see `tagtable/tests/derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `tagtable::Record` from struct field annotations.
///
/// Every named field becomes a `FieldDef` in declaration order, keyed by the
/// field name. Keys must match what the struct serializes to, so use `key`
/// when a serde rename is in play.
///
/// # Field Attributes
///
/// | Attribute | Type | Description |
/// |-----------|------|-------------|
/// | `title` | string | Column header (default: the key) |
/// | `def` | string | Text for empty or missing values |
/// | `format` | string | Formatter name |
/// | `group` | string | Expand the nested record as a group: `"Name"` or `"Name,flatten"` |
/// | `key` | string | Lookup key (default: field name) |
/// | `skip` | flag | Leave the field out entirely |
///
/// A `group` field's type must implement `Record` itself (directly or through
/// `Option`/`Box`), unless it also sets `format`, in which case it renders as
/// a single formatted column.
///
/// # Example
///
/// ```ignore
/// use serde::Serialize;
/// use tagtable::Record;
///
/// #[derive(Serialize, Record)]
/// struct Stats {
///     #[col(title = "CPU")]
///     cpu: String,
///     #[col(title = "Mem", format = "bytes")]
///     mem: u64,
/// }
///
/// #[derive(Serialize, Record)]
/// struct Node {
///     #[col(title = "Name")]
///     name: String,
///
///     #[col(group = "Resources")]
///     stats: Option<Stats>,
///
///     #[col(def = "unknown")]
///     zone: String,
/// }
///
/// let rt = Node::record_type();
/// ```
#[proc_macro_derive(Record, attributes(col))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
