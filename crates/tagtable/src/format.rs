//! Built-in formatters.
//!
//! These are looked up after the formatters registered in
//! [`TableOptions`](crate::TableOptions), so a caller can shadow any of them
//! by registering the same name.
//!
//! | Name | Output |
//! |------|--------|
//! | `upper` | value text in upper case |
//! | `lower` | value text in lower case |
//! | `yesno` | `Yes` / `No` for booleans |
//! | `join` | array elements joined with `, ` |
//! | `count` | length of an array, object or string |
//! | `bytes` | integer byte count with binary units (`1.5Ki`, `4Gi`) |
//! | `json` | compact JSON |

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::BoxError;
use crate::options::{FormatFn, FormatterMap};
use crate::util::{kind_name, stringify_value};

static DEFAULT_FORMATTERS: Lazy<FormatterMap> = Lazy::new(|| {
    let mut map = FormatterMap::new();
    map.insert("upper".into(), wrap(|v| Ok(stringify_value(v).to_uppercase())));
    map.insert("lower".into(), wrap(|v| Ok(stringify_value(v).to_lowercase())));
    map.insert("yesno".into(), wrap(yes_no));
    map.insert("join".into(), wrap(join));
    map.insert("count".into(), wrap(count));
    map.insert("bytes".into(), wrap(bytes));
    map.insert("json".into(), wrap(|v| Ok(v.to_string())));
    map
});

/// The built-in formatter table.
pub fn default_formatters() -> &'static FormatterMap {
    &DEFAULT_FORMATTERS
}

/// Finds a formatter by name, custom map first.
pub(crate) fn resolve_formatter(custom: &FormatterMap, name: &str) -> Option<FormatFn> {
    custom
        .get(name)
        .or_else(|| DEFAULT_FORMATTERS.get(name))
        .cloned()
}

fn wrap<F>(f: F) -> FormatFn
where
    F: Fn(&Value) -> Result<String, BoxError> + Send + Sync + 'static,
{
    Arc::new(move |value, _record| f(value))
}

fn yes_no(value: &Value) -> Result<String, BoxError> {
    Ok(match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        v => stringify_value(v),
    })
}

fn join(value: &Value) -> Result<String, BoxError> {
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(", "),
        v => stringify_value(v),
    })
}

fn count(value: &Value) -> Result<String, BoxError> {
    let n = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        v => return Err(format!("cannot count a {} value", kind_name(v)).into()),
    };
    Ok(n.to_string())
}

const BYTE_UNITS: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

fn bytes(value: &Value) -> Result<String, BoxError> {
    let n = value
        .as_u64()
        .ok_or_else(|| format!("expected a byte count, got {}", stringify_value(value)))?;
    if n < 1024 {
        return Ok(format!("{}B", n));
    }

    let mut size = n as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let text = format!("{:.1}", size);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    Ok(format!("{}{}", text, BYTE_UNITS[unit]))
}
