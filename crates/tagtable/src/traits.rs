//! Traits for derive macro integration.
//!
//! [`Record`] is implemented by `#[derive(Record)]` and ties a Rust type to
//! its [`RecordType`] descriptor, so a schema can be built straight from the
//! type.

use crate::record::RecordType;

/// Types that describe their own fields for table rendering.
///
/// This trait is typically derived, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```rust
/// use serde::Serialize;
/// use tagtable::Record;
///
/// #[derive(Serialize, Record)]
/// struct Stats {
///     #[col(title = "CPU")]
///     cpu: String,
///     mem: String,
/// }
///
/// #[derive(Serialize, Record)]
/// struct Node {
///     #[col(title = "Node")]
///     name: String,
///     #[col(group = "Resources")]
///     stats: Stats,
/// }
///
/// let rt = Node::record_type();
/// assert_eq!(rt.fields.len(), 2);
/// assert!(rt.fields[1].is_group());
/// ```
///
/// # Manual Implementation
///
/// ```rust
/// use tagtable::{FieldDef, Record, RecordType};
///
/// struct Pod {
///     name: String,
///     restarts: u32,
/// }
///
/// impl Record for Pod {
///     fn record_type() -> RecordType {
///         RecordType::new("Pod")
///             .field(FieldDef::new("name").tag("title", "NAME"))
///             .field(FieldDef::new("restarts").tag("def", "0"))
///     }
/// }
/// ```
pub trait Record {
    /// Returns the descriptor of this record type.
    fn record_type() -> RecordType;
}

impl<T: Record> Record for Option<T> {
    fn record_type() -> RecordType {
        T::record_type()
    }
}

impl<T: Record> Record for Box<T> {
    fn record_type() -> RecordType {
        T::record_type()
    }
}
