//! Prelude for convenient imports.
//!
//! Re-exports what a typical caller needs to describe a record and render it:
//!
//! ```rust
//! use tagtable::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! struct Pod {
//!     #[col(title = "NAME")]
//!     name: String,
//! }
//!
//! let mut out = Vec::new();
//! Table::<Pod>::new(&TableOptions::new()).render(&mut out, &[Pod { name: "web-0".into() }]);
//! ```

pub use crate::error::TableError;
pub use crate::options::TableOptions;
pub use crate::table::Table;
pub use crate::traits::Record;
pub use tagtable_macros::Record;
