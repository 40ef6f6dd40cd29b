//! Dynamic option values
//!
//! Service options and similar bags are schema-less on the CacheFly side: a
//! key maps to a string, bool, number, list or nested object depending on the
//! option. [`OptionValue`] is the closed set of shapes such a value can take,
//! with explicit conversions to and from the wire JSON.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{CacheFlyError, Result};

/// A map of option names to values
pub type OptionMap = BTreeMap<String, OptionValue>;

/// One option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(Vec<OptionValue>),
    Map(OptionMap),
}

impl OptionValue {
    /// Convert wire JSON into an option value
    ///
    /// `null` has no representation and yields `None`; nulls nested in lists
    /// and objects are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(OptionValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(OptionValue::Int)
                .or_else(|| n.as_f64().map(OptionValue::Float)),
            Value::String(s) => Some(OptionValue::String(s.clone())),
            Value::Array(items) => Some(OptionValue::List(
                items.iter().filter_map(OptionValue::from_json).collect(),
            )),
            Value::Object(fields) => Some(OptionValue::Map(
                fields
                    .iter()
                    .filter_map(|(k, v)| OptionValue::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Convert back into wire JSON
    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::String(s) => Value::String(s.clone()),
            OptionValue::Bool(b) => Value::Bool(*b),
            OptionValue::Int(i) => Value::from(*i),
            // NaN and infinities have no JSON form
            OptionValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            OptionValue::List(items) => {
                Value::Array(items.iter().map(OptionValue::to_json).collect())
            }
            OptionValue::Map(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Short name of the variant, for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::String(_) => "string",
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::List(_) => "list",
            OptionValue::Map(_) => "map",
        }
    }
}

/// Convert a JSON object into an option map
pub fn options_from_json(value: &Value) -> Result<OptionMap> {
    match value {
        Value::Null => Ok(OptionMap::new()),
        Value::Object(_) => match OptionValue::from_json(value) {
            Some(OptionValue::Map(map)) => Ok(map),
            _ => Ok(OptionMap::new()),
        },
        other => Err(CacheFlyError::Json(format!(
            "expected an object of options, got {}",
            json_kind(other)
        ))),
    }
}

/// Convert an option map into a JSON object
pub fn options_to_json(options: &OptionMap) -> Value {
    Value::Object(
        options
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
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
    fn test_scalars() {
        assert_eq!(
            OptionValue::from_json(&json!("gzip")),
            Some(OptionValue::String("gzip".to_string()))
        );
        assert_eq!(OptionValue::from_json(&json!(true)), Some(OptionValue::Bool(true)));
        assert_eq!(OptionValue::from_json(&json!(3600)), Some(OptionValue::Int(3600)));
        assert_eq!(OptionValue::from_json(&json!(0.5)), Some(OptionValue::Float(0.5)));
        assert_eq!(OptionValue::from_json(&json!(null)), None);
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value = OptionValue::from_json(&json!(u64::MAX)).unwrap();
        assert_eq!(value.type_name(), "float");
    }

    #[test]
    fn test_nested_structures_drop_nulls() {
        let value = OptionValue::from_json(&json!({
            "reverseProxy": {"enabled": true, "hostname": null, "ttl": 60},
            "cors": [ "a.example.com", null, "b.example.com" ]
        }))
        .unwrap();

        let OptionValue::Map(map) = value else {
            panic!("Expected map");
        };
        let OptionValue::Map(proxy) = &map["reverseProxy"] else {
            panic!("Expected nested map");
        };
        assert_eq!(proxy.len(), 2);
        assert!(!proxy.contains_key("hostname"));
        assert_eq!(
            map["cors"],
            OptionValue::List(vec![
                OptionValue::String("a.example.com".to_string()),
                OptionValue::String("b.example.com".to_string()),
            ])
        );
    }

    #[test]
    fn test_to_json_preserves_shape() {
        let original = json!({
            "autoRedirect": false,
            "error_ttl": {"enabled": true, "value": 30},
            "mimeTypes": ["text/css", "application/javascript"],
            "ratio": 1.5
        });
        let options = options_from_json(&original).unwrap();
        assert_eq!(options_to_json(&options), original);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(OptionValue::Float(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_options_from_json_rejects_non_object() {
        let err = options_from_json(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));
        assert!(options_from_json(&Value::Null).unwrap().is_empty());
    }
}
