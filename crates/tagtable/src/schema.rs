//! Schema building.
//!
//! [`TableSchema::build`] walks a [`RecordType`] depth first, in declaration
//! order, and produces the ordered column list and the group list used by the
//! renderer. Group fields (nested records tagged with `group`) are expanded in
//! place and never become columns themselves.
//!
//! # Visibility
//!
//! Every field starts with its parent's visibility; root fields start visible
//! unless [`TableOptions::hide_all_by_default`] is set, or unless `show` is
//! non-empty and names only nested paths, which turns `show` into an
//! allow-list. A field's dotted path listed in `hide` hides it, and listed in
//! `show` shows it; `show` is applied last and therefore wins. A group's
//! visibility is inherited by its children.
//!
//! ```rust
//! use tagtable::{FieldDef, RecordType, TableOptions, TableSchema};
//!
//! fn stats() -> RecordType {
//!     RecordType::new("Stats")
//!         .field(FieldDef::new("cpu"))
//!         .field(FieldDef::new("mem"))
//! }
//!
//! let rt = RecordType::new("Node")
//!     .field(FieldDef::new("name"))
//!     .field(FieldDef::new("stats").tag("group", "Resources").nested(stats));
//!
//! let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
//! let keys: Vec<&str> = schema.columns().iter().map(|c| c.key.as_str()).collect();
//! assert_eq!(keys, ["name", "cpu", "mem"]);
//! assert_eq!(schema.groups().len(), 2);
//! ```

use std::fmt;

use crate::error::{Result, TableError};
use crate::format::resolve_formatter;
use crate::options::{FormatFn, TableOptions};
use crate::record::{FieldDef, RecordType, DEFAULT_TAG, FORMAT_TAG, GROUP_TAG, TITLE_TAG};
use crate::tag::Tag;
use crate::traits::Record;

/// Group flag suppressing the group's header segment.
pub const FLATTEN_FLAG: &str = "flatten";
/// Group key carrying an optional prefix.
pub const PREFIX_KEY: &str = "prefix";

/// Identifier of a group, unique within one schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cluster of columns coming from one nested record, or the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    /// Display label. Empty names are always flattened.
    pub name: String,
    /// Hide the group's header segment while keeping its membership.
    pub flatten: bool,
    /// `prefix=` value of the group tag, if any.
    pub prefix: Option<String>,
}

impl Group {
    fn from_tag(id: GroupId, raw: &str) -> Self {
        let tag = Tag::parse(raw);
        Group {
            id,
            flatten: tag.flag(FLATTEN_FLAG) || tag.val.is_empty(),
            prefix: tag.key(PREFIX_KEY).map(str::to_string),
            name: tag.val,
        }
    }
}

/// One renderable field.
#[derive(Clone)]
pub struct Column {
    /// Field key within its immediate record.
    pub key: String,
    /// Keys leading from the root record to the record holding `key`.
    pub path: Vec<String>,
    pub group_id: GroupId,
    /// Header text; the key unless a `title` tag is set.
    pub title: String,
    /// Text shown when the cell would otherwise be empty.
    pub default: String,
    /// Formatter name from the `format` tag.
    pub format: Option<String>,
    pub formatter: Option<FormatFn>,
}

impl Column {
    /// Dotted path of the column, e.g. `stats.cpu`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.key.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("path", &self.path)
            .field("group_id", &self.group_id)
            .field("title", &self.title)
            .field("default", &self.default)
            .field("format", &self.format)
            .finish()
    }
}

/// Immutable column and group layout for one record type.
#[derive(Clone, Debug)]
pub struct TableSchema {
    record: &'static str,
    columns: Vec<Column>,
    groups: Vec<Group>,
    options: TableOptions,
}

impl TableSchema {
    /// Builds the schema of `record_type`.
    ///
    /// Fails on the first field naming an unknown formatter, or on a group
    /// field that nests a record already being expanded.
    pub fn build(record_type: &RecordType, options: &TableOptions) -> Result<Self> {
        let mut builder = Builder {
            options,
            columns: Vec::new(),
            groups: Vec::new(),
            next_id: 0,
            stack: Vec::new(),
        };

        let root = builder.new_group("");
        let visible = root_visibility(options);
        let result = builder.add_fields(record_type, &[], root, visible);

        if let Err(err) = result {
            tracing::warn!(record = record_type.name, error = %err, "table schema build failed");
            return Err(err);
        }

        tracing::debug!(
            record = record_type.name,
            columns = builder.columns.len(),
            groups = builder.groups.len(),
            "table schema built"
        );

        Ok(TableSchema {
            record: record_type.name,
            columns: builder.columns,
            groups: builder.groups,
            options: options.clone(),
        })
    }

    /// Builds the schema of a [`Record`] type.
    pub fn for_record<R: Record>(options: &TableOptions) -> Result<Self> {
        Self::build(&R::record_type(), options)
    }

    /// Name of the record type the schema was built from.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Columns in render order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Groups in creation order; the root group comes first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Options the schema was built with.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Looks up a group by id.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Number of columns owned by a group.
    pub fn group_width(&self, id: GroupId) -> usize {
        self.columns.iter().filter(|c| c.group_id == id).count()
    }
}

/// Root fields are visible unless everything is hidden by default, or the
/// show list names nested paths only.
fn root_visibility(options: &TableOptions) -> bool {
    if options.hide_all_by_default {
        return false;
    }
    options.show.is_empty() || options.show.iter().any(|p| !p.contains('.'))
}

struct Builder<'a> {
    options: &'a TableOptions,
    columns: Vec<Column>,
    groups: Vec<Group>,
    next_id: usize,
    /// Nested descriptors being expanded, by function address and name.
    stack: Vec<(usize, &'static str)>,
}

impl Builder<'_> {
    fn new_group(&mut self, raw_tag: &str) -> GroupId {
        self.next_id += 1;
        let id = GroupId(self.next_id);
        self.groups.push(Group::from_tag(id, raw_tag));
        id
    }

    fn add_fields(
        &mut self,
        record_type: &RecordType,
        path: &[String],
        group: GroupId,
        visible: bool,
    ) -> Result<()> {
        for field in &record_type.fields {
            self.add_field(field, path, group, visible)?;
        }
        Ok(())
    }

    fn add_field(
        &mut self,
        field: &FieldDef,
        path: &[String],
        group: GroupId,
        mut visible: bool,
    ) -> Result<()> {
        let dotted = path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(field.key.as_str()))
            .collect::<Vec<_>>()
            .join(".");

        if self.options.hide.iter().any(|p| *p == dotted) {
            visible = false;
        }
        if self.options.show.iter().any(|p| *p == dotted) {
            visible = true;
        }

        match field.nested {
            Some(nested) if field.is_group() => {
                return self.add_group(field, nested, path, visible);
            }
            _ => {}
        }

        if !visible {
            return Ok(());
        }

        let column = self.to_column(field, path, group)?;
        self.columns.push(column);
        Ok(())
    }

    fn add_group(
        &mut self,
        field: &FieldDef,
        nested: fn() -> RecordType,
        path: &[String],
        visible: bool,
    ) -> Result<()> {
        let record_type = nested();
        let frame = (nested as usize, record_type.name);
        if self.stack.contains(&frame) {
            return Err(TableError::RecursiveGroup {
                field: field.key.clone(),
                record: record_type.name.to_string(),
            });
        }

        let group = self.new_group(field.tag_value(GROUP_TAG));
        let mut group_path = path.to_vec();
        group_path.push(field.key.clone());

        self.stack.push(frame);
        let result = self.add_fields(&record_type, &group_path, group, visible);
        self.stack.pop();
        result
    }

    fn to_column(&self, field: &FieldDef, path: &[String], group: GroupId) -> Result<Column> {
        let format = field.tag_value(FORMAT_TAG);
        let (format, formatter) = if format.is_empty() {
            (None, None)
        } else {
            let f = resolve_formatter(&self.options.formatters, format).ok_or_else(|| {
                TableError::UnknownFormat {
                    format: format.to_string(),
                    field: field.key.clone(),
                }
            })?;
            (Some(format.to_string()), Some(f))
        };

        let title = match field.tag_value(TITLE_TAG) {
            "" => field.key.clone(),
            t => t.to_string(),
        };

        Ok(Column {
            key: field.key.clone(),
            path: path.to_vec(),
            group_id: group,
            title,
            default: field.tag_value(DEFAULT_TAG).to_string(),
            format,
            formatter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> RecordType {
        RecordType::new("Stats")
            .field(FieldDef::new("cpu").tag(TITLE_TAG, "CPU"))
            .field(FieldDef::new("mem").tag(TITLE_TAG, "Mem"))
    }

    fn net() -> RecordType {
        RecordType::new("Net")
            .field(FieldDef::new("ip"))
            .field(FieldDef::new("port"))
    }

    fn node() -> RecordType {
        RecordType::new("Node")
            .field(FieldDef::new("name").tag(TITLE_TAG, "Full Name"))
            .field(FieldDef::new("stats").tag(GROUP_TAG, "Resources").nested(stats))
            .field(FieldDef::new("age"))
            .field(FieldDef::new("net").tag(GROUP_TAG, "Network,flatten").nested(net))
    }

    fn keys(schema: &TableSchema) -> Vec<String> {
        schema.columns().iter().map(Column::dotted_path).collect()
    }

    #[test]
    fn depth_first_declaration_order() {
        let schema = TableSchema::build(&node(), &TableOptions::new()).unwrap();
        assert_eq!(
            keys(&schema),
            ["name", "stats.cpu", "stats.mem", "age", "net.ip", "net.port"]
        );
    }

    #[test]
    fn root_group_first_and_columns_reference_groups() {
        let schema = TableSchema::build(&node(), &TableOptions::new()).unwrap();
        let groups = schema.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].id, GroupId(1));
        assert!(groups[0].flatten);
        assert_eq!(groups[1].name, "Resources");
        assert!(!groups[1].flatten);
        assert_eq!(groups[2].name, "Network");
        assert!(groups[2].flatten);

        for col in schema.columns() {
            assert!(schema.group(col.group_id).is_some());
        }
        assert_eq!(schema.columns()[0].group_id, schema.columns()[3].group_id);
        assert_eq!(schema.group_width(GroupId(1)), 2);
        assert_eq!(schema.group_width(GroupId(2)), 2);
    }

    #[test]
    fn group_ids_restart_per_build() {
        let a = TableSchema::build(&node(), &TableOptions::new()).unwrap();
        let b = TableSchema::build(&node(), &TableOptions::new()).unwrap();
        let ids = |s: &TableSchema| s.groups().iter().map(|g| g.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn title_and_default_from_tags() {
        let rt = RecordType::new("Row")
            .field(FieldDef::new("name").tag(TITLE_TAG, "Full Name"))
            .field(FieldDef::new("state").tag(DEFAULT_TAG, "deleted"));
        let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
        assert_eq!(schema.columns()[0].title, "Full Name");
        assert_eq!(schema.columns()[0].default, "");
        assert_eq!(schema.columns()[1].title, "state");
        assert_eq!(schema.columns()[1].default, "deleted");
    }

    #[test]
    fn hide_then_show_same_path_is_visible() {
        let rt = RecordType::new("Person")
            .field(FieldDef::new("name"))
            .field(FieldDef::new("age"));
        let opts = TableOptions::new().hide("age").show("age");
        let schema = TableSchema::build(&rt, &opts).unwrap();
        assert_eq!(keys(&schema), ["name", "age"]);
    }

    #[test]
    fn hide_removes_field() {
        let opts = TableOptions::new().hide("age").hide("stats.mem");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(keys(&schema), ["name", "stats.cpu", "net.ip", "net.port"]);
    }

    #[test]
    fn hiding_a_group_hides_its_children() {
        let opts = TableOptions::new().hide("stats");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(keys(&schema), ["name", "age", "net.ip", "net.port"]);
        // the group is still allocated, it just owns nothing
        assert_eq!(schema.groups().len(), 3);
        assert_eq!(schema.group_width(GroupId(2)), 0);
    }

    #[test]
    fn nested_only_show_is_an_allow_list() {
        let opts = TableOptions::new().show("stats.cpu");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(keys(&schema), ["stats.cpu"]);
    }

    #[test]
    fn showing_a_group_shows_its_children() {
        let opts = TableOptions::new().hide_all_by_default(true).show("net");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(keys(&schema), ["net.ip", "net.port"]);
    }

    #[test]
    fn hide_all_by_default_with_top_level_show() {
        let opts = TableOptions::new().hide_all_by_default(true).show("age");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(keys(&schema), ["age"]);
    }

    #[test]
    fn top_level_show_keeps_default_visibility() {
        let opts = TableOptions::new().show("name").hide("age");
        let schema = TableSchema::build(&node(), &opts).unwrap();
        assert_eq!(
            keys(&schema),
            ["name", "stats.cpu", "stats.mem", "net.ip", "net.port"]
        );
    }

    #[test]
    fn unknown_format_fails_build() {
        let rt = RecordType::new("Invoice")
            .field(FieldDef::new("id"))
            .field(FieldDef::new("total").tag(FORMAT_TAG, "money"));
        let err = TableSchema::build(&rt, &TableOptions::new()).unwrap_err();
        match err {
            TableError::UnknownFormat { format, field } => {
                assert_eq!(format, "money");
                assert_eq!(field, "total");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn hidden_field_with_unknown_format_is_not_resolved() {
        let rt = RecordType::new("Invoice").field(FieldDef::new("total").tag(FORMAT_TAG, "money"));
        let opts = TableOptions::new().hide("total");
        assert!(TableSchema::build(&rt, &opts).is_ok());
    }

    #[test]
    fn custom_then_builtin_formatter() {
        let rt = RecordType::new("Invoice")
            .field(FieldDef::new("total").tag(FORMAT_TAG, "money"))
            .field(FieldDef::new("tags").tag(FORMAT_TAG, "join"));
        let opts = TableOptions::new().formatter("money", |v, _| Ok(format!("${v}")));
        let schema = TableSchema::build(&rt, &opts).unwrap();
        assert!(schema.columns().iter().all(|c| c.formatter.is_some()));
        assert_eq!(schema.columns()[0].format.as_deref(), Some("money"));
    }

    #[test]
    fn group_with_format_becomes_a_column() {
        let rt = RecordType::new("Node").field(
            FieldDef::new("stats")
                .tag(GROUP_TAG, "Resources")
                .tag(FORMAT_TAG, "json")
                .nested(stats),
        );
        let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
        assert_eq!(keys(&schema), ["stats"]);
        assert_eq!(schema.groups().len(), 1);
    }

    #[test]
    fn group_prefix_key_is_kept() {
        let rt = RecordType::new("Node")
            .field(FieldDef::new("stats").tag(GROUP_TAG, "Res,prefix=r_").nested(stats));
        let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
        assert_eq!(schema.groups()[1].prefix.as_deref(), Some("r_"));
    }

    fn looping() -> RecordType {
        RecordType::new("Loop")
            .field(FieldDef::new("id"))
            .field(FieldDef::new("next").tag(GROUP_TAG, "Next").nested(looping))
    }

    #[test]
    fn recursive_group_is_an_error() {
        let err = TableSchema::build(&looping(), &TableOptions::new()).unwrap_err();
        assert!(matches!(err, TableError::RecursiveGroup { .. }));
    }

    #[test]
    fn distinct_records_may_share_a_name() {
        fn other_node() -> RecordType {
            RecordType::new("Node").field(FieldDef::new("z"))
        }

        let rt = RecordType::new("Node")
            .field(FieldDef::new("a"))
            .field(FieldDef::new("o").tag(GROUP_TAG, "Other").nested(other_node));
        let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
        assert_eq!(keys(&schema), ["a", "o.z"]);
    }

    #[test]
    fn same_record_in_sibling_groups_is_not_recursive() {
        let rt = RecordType::new("Pair")
            .field(FieldDef::new("left").tag(GROUP_TAG, "Left").nested(stats))
            .field(FieldDef::new("right").tag(GROUP_TAG, "Right").nested(stats));
        let schema = TableSchema::build(&rt, &TableOptions::new()).unwrap();
        assert_eq!(
            keys(&schema),
            ["left.cpu", "left.mem", "right.cpu", "right.mem"]
        );
    }

    #[test]
    fn schema_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TableSchema>();
    }
}
