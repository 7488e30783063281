//! Line rendering for a built schema.
//!
//! Output is plain text with tab separated cells, meant to be aligned by a
//! tab-stop writer downstream (see [`Table::render_aligned`]).
//!
//! The header is up to three lines:
//!
//! ```text
//!         ┌⦿ Resources
//! Full Name       ├⚬ CPU  Mem
//! ─────────       │  ───  ───
//! ```
//!
//! The group line only appears when the schema has more than the root group.
//! A cell whose column belongs to a different group than the previous column
//! is prefixed with a boundary glyph.
//!
//! [`Table::render_aligned`]: crate::Table::render_aligned

use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::error::{Result, TableError};
use crate::schema::{Column, GroupId, TableSchema};
use crate::util::{lookup_value, stringify_value};

/// Prefix of a named group in the group line.
pub const GROUP_SEPARATOR: &str = "┌⦿ ";
/// Prefix of a title that starts a new group.
pub const TITLE_SEPARATOR: &str = "├⚬ ";
/// Prefix of a border or data cell that starts a new group.
pub const ROW_SEPARATOR: &str = "│  ";
/// Character repeated under each title.
pub const BORDER_CHAR: char = '─';

impl TableSchema {
    /// Group line, title line and border line.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);

        if let Some(groups) = self.group_line() {
            lines.push(groups);
        }

        let mut titles = Vec::with_capacity(self.columns().len());
        let mut borders = Vec::with_capacity(self.columns().len());
        for (i, col) in self.columns().iter().enumerate() {
            let border = BORDER_CHAR.to_string().repeat(col.title.width());
            if self.starts_group(i) {
                titles.push(format!("{}{}", TITLE_SEPARATOR, col.title));
                borders.push(format!("{}{}", ROW_SEPARATOR, border));
            } else {
                titles.push(col.title.clone());
                borders.push(border);
            }
        }

        lines.push(titles.join("\t"));
        lines.push(borders.join("\t"));
        lines
    }

    /// One data line for a serialized record.
    ///
    /// Missing or `null` values render as the column default. A failing
    /// formatter aborts the line.
    pub fn row_line(&self, record: &Value) -> Result<String> {
        let mut cells = Vec::with_capacity(self.columns().len());
        for (i, col) in self.columns().iter().enumerate() {
            let mut cell = cell_text(col, record)?;
            if cell.is_empty() {
                cell = col.default.clone();
            }
            if self.starts_group(i) {
                cell.insert_str(0, ROW_SEPARATOR);
            }
            cells.push(cell);
        }
        Ok(cells.join("\t"))
    }

    /// Group names padded with one tab per spanned column, or `None` when
    /// the schema has only the root group or no columns at all.
    ///
    /// Segments follow column order: each run of adjacent columns from the
    /// same group gets one segment, so a group interrupted by root fields
    /// still lines up with its own columns. A group is labelled on its
    /// first run only.
    fn group_line(&self) -> Option<String> {
        if self.groups().len() <= 1 || self.columns().is_empty() {
            return None;
        }

        let mut line = String::new();
        let mut labelled: Vec<GroupId> = Vec::new();
        let mut start = 0;
        while start < self.columns().len() {
            let id = self.columns()[start].group_id;
            let span = self.columns()[start..]
                .iter()
                .take_while(|c| c.group_id == id)
                .count();

            if !labelled.contains(&id) {
                labelled.push(id);
                if let Some(group) = self.group(id).filter(|g| !g.flatten) {
                    line.push_str(GROUP_SEPARATOR);
                    line.push_str(&group.name);
                }
            }
            line.push_str(&"\t".repeat(span));
            start += span;
        }

        Some(line)
    }

    fn starts_group(&self, index: usize) -> bool {
        index > 0 && self.group_at(index - 1) != self.group_at(index)
    }

    fn group_at(&self, index: usize) -> Option<GroupId> {
        self.columns().get(index).map(|c| c.group_id)
    }
}

fn cell_text(col: &Column, record: &Value) -> Result<String> {
    let Some(value) = lookup_value(record, &col.path, &col.key) else {
        return Ok(String::new());
    };

    match &col.formatter {
        Some(format) => format(value, record).map_err(|source| TableError::Format {
            field: col.dotted_path(),
            source,
        }),
        None => Ok(stringify_value(value)),
    }
}
