//! Table options: visibility rules and formatter registry.
//!
//! Options can be assembled in code or loaded from YAML/JSON. Formatters are
//! functions and therefore only registered in code.
//!
//! ```rust
//! use tagtable::TableOptions;
//!
//! let opts = TableOptions::from_yaml(r#"
//! hide_all_by_default: false
//! show: [stats.cpu]
//! hide: [age]
//! "#).unwrap()
//! .formatter("money", |v, _record| Ok(format!("${}", v)));
//!
//! assert_eq!(opts.show, vec!["stats.cpu"]);
//! assert!(opts.formatters.contains_key("money"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoxError, Result};

/// Formats one cell: `(value, whole_record) -> text`.
pub type FormatFn = Arc<dyn Fn(&Value, &Value) -> std::result::Result<String, BoxError> + Send + Sync>;

/// Formatters by name.
pub type FormatterMap = HashMap<String, FormatFn>;

/// Options consumed by the schema builder.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOptions {
    /// Hide root fields unless they are listed in `show`.
    pub hide_all_by_default: bool,
    /// Dotted field paths forced visible. Wins over `hide`.
    pub show: Vec<String>,
    /// Dotted field paths forced hidden.
    pub hide: Vec<String>,
    /// Named formatters, consulted before the built-in ones.
    #[serde(skip)]
    pub formatters: FormatterMap,
}

impl TableOptions {
    /// Options with everything visible and no custom formatters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::TableError::Config(e.to_string()))
    }

    /// Sets whether root fields start hidden.
    pub fn hide_all_by_default(mut self, hide: bool) -> Self {
        self.hide_all_by_default = hide;
        self
    }

    /// Forces a dotted path visible.
    pub fn show(mut self, path: impl Into<String>) -> Self {
        self.show.push(path.into());
        self
    }

    /// Forces a dotted path hidden.
    pub fn hide(mut self, path: impl Into<String>) -> Self {
        self.hide.push(path.into());
        self
    }

    /// Registers a named formatter.
    pub fn formatter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(f));
        self
    }

    /// Registers an already shared formatter.
    pub fn formatter_fn(mut self, name: impl Into<String>, f: FormatFn) -> Self {
        self.formatters.insert(name.into(), f);
        self
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.formatters.keys().collect();
        names.sort();
        f.debug_struct("TableOptions")
            .field("hide_all_by_default", &self.hide_all_by_default)
            .field("show", &self.show)
            .field("hide", &self.hide)
            .field("formatters", &names)
            .finish()
    }
}
