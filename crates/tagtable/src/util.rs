//! Value helpers shared by the renderer and the built-in formatters.

use serde_json::Value;

/// Converts a value to the text shown in a cell.
///
/// Strings are used verbatim, numbers and booleans use their display form,
/// `null` is empty and arrays or objects fall back to compact JSON.
///
/// ```rust
/// use serde_json::json;
/// use tagtable::stringify_value;
///
/// assert_eq!(stringify_value(&json!("Ada")), "Ada");
/// assert_eq!(stringify_value(&json!(30)), "30");
/// assert_eq!(stringify_value(&json!(null)), "");
/// assert_eq!(stringify_value(&json!([1, 2])), "[1,2]");
/// ```
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        v => v.to_string(),
    }
}

/// Walks `path` then `key` through nested objects.
///
/// Returns `None` when a segment is missing, an intermediate value is not an
/// object, or the final value is `null`.
pub fn lookup_value<'a, S: AsRef<str>>(data: &'a Value, path: &[S], key: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in path.iter().map(AsRef::as_ref).chain(std::iter::once(key)) {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }

    match current {
        Value::Null => None,
        v => Some(v),
    }
}

/// Short name of a value's kind for diagnostics.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stringify_scalars() {
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!(-4)), "-4");
        assert_eq!(stringify_value(&json!(1.5)), "1.5");
        assert_eq!(stringify_value(&json!("")), "");
    }

    #[test]
    fn stringify_object_is_json() {
        assert_eq!(stringify_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn lookup_top_level() {
        let data = json!({"name": "Ada"});
        let empty: [&str; 0] = [];
        assert_eq!(lookup_value(&data, &empty, "name"), Some(&json!("Ada")));
    }

    #[test]
    fn lookup_nested_path() {
        let data = json!({"stats": {"cpu": "2"}});
        assert_eq!(lookup_value(&data, &["stats"], "cpu"), Some(&json!("2")));
    }

    #[test]
    fn lookup_through_null_is_none() {
        let data = json!({"stats": null});
        assert_eq!(lookup_value(&data, &["stats"], "cpu"), None);
    }

    #[test]
    fn lookup_through_scalar_is_none() {
        let data = json!({"stats": 3});
        assert_eq!(lookup_value(&data, &["stats"], "cpu"), None);
    }

    #[test]
    fn lookup_null_leaf_is_none() {
        let data = json!({"name": null});
        let empty: [&str; 0] = [];
        assert_eq!(lookup_value(&data, &empty, "name"), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_name(&json!({})), "object");
        assert_eq!(kind_name(&json!([])), "array");
    }
}
