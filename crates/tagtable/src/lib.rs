//! # tagtable - tag-driven grouped tables
//!
//! `tagtable` turns a record type plus per-field annotations into aligned,
//! grouped plain-text tables, without per-type formatting code.
//!
//! It works in two steps:
//!
//! 1. A [`TableSchema`] is built once per record type from its
//!    [`RecordType`] descriptor and the [`TableOptions`]: which fields are
//!    visible, their titles, defaults and formatters, and how nested records
//!    cluster into column groups.
//! 2. The schema renders a header (group line, title line, border line) and
//!    one tab separated line per record.
//!
//! [`Table`] wraps both steps in a fluent handle that keeps the first error.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use tagtable::{Record, Table, TableOptions};
//!
//! #[derive(Serialize, Record)]
//! struct Stats {
//!     #[col(title = "CPU")]
//!     cpu: String,
//!     #[col(title = "Mem", def = "-")]
//!     mem: String,
//! }
//!
//! #[derive(Serialize, Record)]
//! struct Node {
//!     #[col(title = "Name")]
//!     name: String,
//!     #[col(group = "Resources")]
//!     stats: Stats,
//! }
//!
//! let nodes = vec![Node {
//!     name: "worker-1".into(),
//!     stats: Stats { cpu: "2".into(), mem: String::new() },
//! }];
//!
//! let mut out = Vec::new();
//! let mut table = Table::<Node>::new(&TableOptions::new());
//! table.render(&mut out, &nodes);
//! assert!(table.error().is_none());
//!
//! let text = String::from_utf8(out).unwrap();
//! let lines: Vec<&str> = text.lines().collect();
//! assert_eq!(lines[0], "\t┌⦿ Resources\t\t");
//! assert_eq!(lines[1], "Name\t├⚬ CPU\tMem");
//! assert_eq!(lines[3], "worker-1\t│  2\t-");
//! ```
//!
//! ## Field Tags
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `title` | Column header (default: the field key) |
//! | `def` | Text shown when the value is empty or missing |
//! | `format` | Name of a formatter, custom or built-in |
//! | `group` | Expand a nested record as a column group: `"Name"`, `"Name,flatten"` |
//!
//! ## Visibility
//!
//! [`TableOptions`] takes dotted paths (`"age"`, `"stats.cpu"`) in `show` and
//! `hide`. `show` wins when a path is in both. See [`schema`] for the full
//! rules.

// Lets generated `::tagtable::` paths resolve inside this crate's own tests.
extern crate self as tagtable;

mod error;
pub mod format;
mod options;
pub mod prelude;
pub mod record;
pub mod render;
pub mod schema;
mod table;
mod tag;
mod traits;
mod util;

pub use error::{BoxError, Result, TableError};
pub use format::default_formatters;
pub use options::{FormatFn, FormatterMap, TableOptions};
pub use record::{FieldDef, RecordType};
pub use schema::{Column, Group, GroupId, TableSchema};
pub use table::{Table, ALIGN_PADDING};
pub use tag::Tag;
pub use traits::Record;
pub use util::{lookup_value, stringify_value};

pub use tagtable_macros::Record;
