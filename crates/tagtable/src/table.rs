//! Fluent table handle with a sticky error slot.
//!
//! [`Table`] pairs a shared [`TableSchema`] with the first error seen while
//! building or rendering. Once an error is stored every further call is a
//! no-op, so a render sequence can be chained and checked once at the end:
//!
//! ```rust
//! use serde::Serialize;
//! use tagtable::{Record, Table, TableOptions};
//!
//! #[derive(Serialize, Record)]
//! struct Person {
//!     #[col(title = "Full Name")]
//!     name: String,
//!     age: u32,
//! }
//!
//! let people = vec![Person { name: "Ada".into(), age: 30 }];
//! let mut out = Vec::new();
//! let mut table = Table::<Person>::new(&TableOptions::new());
//! table.render(&mut out, &people);
//! assert!(table.error().is_none());
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text, "Full Name\tage\n─────────\t───\nAda\t30\n");
//! ```
//!
//! Lines already written before an error stay written; a stored error means
//! the output is incomplete.

use std::io::Write;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tabwriter::TabWriter;

use crate::error::TableError;
use crate::options::TableOptions;
use crate::schema::TableSchema;
use crate::traits::Record;
use crate::util::kind_name;

/// Padding between aligned columns in [`Table::render_aligned`].
pub const ALIGN_PADDING: usize = 2;

/// Renders records of type `R` against a shared schema.
pub struct Table<R> {
    schema: Option<Arc<TableSchema>>,
    err: Option<TableError>,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> Table<R> {
    /// Builds the schema of `R`. A build failure is stored, not returned.
    pub fn new(options: &TableOptions) -> Self {
        match TableSchema::for_record::<R>(options) {
            Ok(schema) => Self::from_schema(Arc::new(schema)),
            Err(err) => Table {
                schema: None,
                err: Some(err),
                _record: PhantomData,
            },
        }
    }
}

impl<R> Table<R> {
    /// Wraps an already built schema, e.g. one shared between threads.
    pub fn from_schema(schema: Arc<TableSchema>) -> Self {
        Table {
            schema: Some(schema),
            err: None,
            _record: PhantomData,
        }
    }

    /// First error stored by a build or render call.
    pub fn error(&self) -> Option<&TableError> {
        self.err.as_ref()
    }

    /// `Err` with the stored error, if any.
    pub fn result(&self) -> Result<(), &TableError> {
        match &self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Consumes the table, returning the stored error if any.
    pub fn finish(self) -> Result<(), TableError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The schema, unless the build failed.
    pub fn schema(&self) -> Option<&Arc<TableSchema>> {
        self.schema.as_ref()
    }

    /// Writes the group, title and border lines.
    pub fn render_header<W: Write>(&mut self, w: &mut W) -> &mut Self {
        let Some(schema) = self.live_schema() else {
            return self;
        };
        for line in schema.header_lines() {
            if let Err(err) = writeln!(w, "{}", line) {
                return self.fail(err.into());
            }
        }
        self
    }

    /// Writes one line per record, in order.
    pub fn render_rows<W: Write>(&mut self, w: &mut W, rows: &[R]) -> &mut Self
    where
        R: Serialize,
    {
        let Some(schema) = self.live_schema() else {
            return self;
        };
        for (index, row) in rows.iter().enumerate() {
            let result = serde_json::to_value(row)
                .map_err(TableError::from)
                .and_then(|record| write_row(&schema, &mut *w, index, &record));
            if let Err(err) = result {
                return self.fail(err);
            }
        }
        self
    }

    /// Writes rows from an already serialized value, which must be an array.
    pub fn render_values<W: Write>(&mut self, w: &mut W, rows: &Value) -> &mut Self {
        let Some(schema) = self.live_schema() else {
            return self;
        };
        let Value::Array(records) = rows else {
            return self.fail(TableError::NotASequence {
                found: kind_name(rows),
            });
        };
        for (index, record) in records.iter().enumerate() {
            if let Err(err) = write_row(&schema, w, index, record) {
                return self.fail(err);
            }
        }
        self
    }

    /// Header followed by rows.
    pub fn render<W: Write>(&mut self, w: &mut W, rows: &[R]) -> &mut Self
    where
        R: Serialize,
    {
        self.render_header(w).render_rows(w, rows)
    }

    /// Like [`render`](Self::render), with columns padded to a common width
    /// instead of tab separated.
    pub fn render_aligned<W: Write>(&mut self, w: &mut W, rows: &[R]) -> &mut Self
    where
        R: Serialize,
    {
        if self.err.is_some() {
            return self;
        }
        let mut tw = TabWriter::new(&mut *w).padding(ALIGN_PADDING);
        self.render(&mut tw, rows);
        // flush even after a failure so already rendered lines reach `w`
        if let Err(err) = tw.flush() {
            return self.fail(err.into());
        }
        self
    }

    fn live_schema(&self) -> Option<Arc<TableSchema>> {
        match &self.err {
            Some(_) => None,
            None => self.schema.clone(),
        }
    }

    fn fail(&mut self, err: TableError) -> &mut Self {
        tracing::warn!(error = %err, "table render failed");
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }
}

fn write_row<W: Write>(
    schema: &TableSchema,
    w: &mut W,
    index: usize,
    record: &Value,
) -> Result<(), TableError> {
    let line = schema.row_line(record)?;
    tracing::trace!(record = schema.record_name(), index, "row rendered");
    writeln!(w, "{}", line)?;
    Ok(())
}
