//! Common utilities for output formatters

use serde::Serialize;
use serde_json::Value;

/// Shown in tables instead of the value of a sensitive attribute
pub const SENSITIVE_PLACEHOLDER: &str = "(sensitive)";

/// Render a JSON value for a table cell
///
/// Strings are shown unquoted, `null` as "-", and lists and objects as
/// compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

/// Print a value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) {
    match serde_yml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Error serializing to YAML: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value_scalars() {
        assert_eq!(display_value(&json!("WEB")), "WEB");
        assert_eq!(display_value(&json!(null)), "-");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(86400)), "86400");
    }

    #[test]
    fn test_display_value_compound() {
        assert_eq!(display_value(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(display_value(&json!({"enabled": true})), r#"{"enabled":true}"#);
    }
}
