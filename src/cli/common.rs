//! Common CLI types shared across commands

use clap::ValueEnum;
use serde_json::Value;

use crate::error::{CacheFlyError, Result};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table (default)
    Table,
    /// JSON, suitable for feeding back as --state
    Json,
    /// YAML format
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse a JSON argument given inline or as `@path/to/file.json`
pub fn load_json_arg(arg: &str) -> Result<Value> {
    let (source, text) = match arg.strip_prefix('@') {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CacheFlyError::Config(format!("cannot read '{}': {}", path, e))
            })?;
            (path, text)
        }
        None => ("argument", arg.to_string()),
    };

    serde_json::from_str(&text)
        .map_err(|e| CacheFlyError::Json(format!("invalid JSON in {}: {}", source, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_load_json_inline() {
        let value = load_json_arg(r#"{"limit": 10}"#).unwrap();
        assert_eq!(value, json!({"limit": 10}));
    }

    #[test]
    fn test_load_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": "o1", "type": "WEB"}}"#).unwrap();

        let arg = format!("@{}", file.path().display());
        let value = load_json_arg(&arg).unwrap();
        assert_eq!(value["type"], "WEB");
    }

    #[test]
    fn test_load_json_missing_file() {
        let err = load_json_arg("@/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_json_invalid() {
        let err = load_json_arg("{not json").unwrap_err();
        assert!(err.to_string().contains("invalid JSON in argument"));
    }
}
