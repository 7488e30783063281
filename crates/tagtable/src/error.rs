//! Error types for schema building and rendering.
//!
//! This module provides [`TableError`], the error type for every fallible
//! operation in the crate. A [`Table`](crate::Table) stores the first error it
//! hits and turns later calls into no-ops, so most callers only ever see these
//! through [`Table::error`](crate::Table::error).

use thiserror::Error;

/// Boxed error returned by formatter functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a schema or rendering rows.
#[derive(Debug, Error)]
pub enum TableError {
    /// A field asked for a formatter that is neither registered in the
    /// options nor one of the built-in formatters.
    #[error("no format function named '{format}' for field '{field}'; register it in TableOptions::formatters")]
    UnknownFormat { format: String, field: String },

    /// A group field nests the record type that is already being expanded.
    #[error("group field '{field}' recursively nests record '{record}'")]
    RecursiveGroup { field: String, record: String },

    /// A formatter returned an error for one cell.
    #[error("formatter failed on field '{field}': {source}")]
    Format {
        field: String,
        #[source]
        source: BoxError,
    },

    /// Rows handed to the renderer were not an array.
    #[error("rows must be a sequence, got {found}")]
    NotASequence { found: &'static str },

    /// A record could not be serialized into a value tree.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table options could not be parsed.
    #[error("invalid table options: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_names_field_and_format() {
        let err = TableError::UnknownFormat {
            format: "money".to_string(),
            field: "price".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("money"));
        assert!(msg.contains("price"));
    }

    #[test]
    fn format_error_keeps_source() {
        use std::error::Error as _;

        let err = TableError::Format {
            field: "size".to_string(),
            source: "not a number".into(),
        };
        assert!(err.to_string().contains("not a number"));
        assert!(err.source().is_some());
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: TableError = io_err.into();
        assert!(matches!(err, TableError::Io(_)));
    }

    #[test]
    fn from_yaml_error_is_config() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ nope").unwrap_err();
        let err: TableError = yaml_err.into();
        assert!(matches!(err, TableError::Config(_)));
    }
}
