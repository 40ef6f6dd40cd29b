//! Conversions between JSON state and typed models

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::diagnostics::Diagnostics;

/// Outcome of refreshing a resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState {
    /// The object exists; carries its refreshed state
    Present(Value),
    /// The object is gone upstream and should be dropped from state
    Removed,
}

/// Decode a configuration or state object into a typed model
///
/// `null` decodes like an empty object, so models whose fields are all
/// optional accept a missing block.
pub fn decode<T: DeserializeOwned>(value: &Value, what: &str, diags: &mut Diagnostics) -> Option<T> {
    let value = match value {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other.clone(),
    };

    match serde_json::from_value(value) {
        Ok(model) => Some(model),
        Err(e) => {
            diags.error(format!("Invalid {}", what), e.to_string());
            None
        }
    }
}

/// Encode a typed model into a JSON state object
pub fn encode<T: Serialize>(model: &T, diags: &mut Diagnostics) -> Option<Value> {
    match serde_json::to_value(model) {
        Ok(value) => Some(value),
        Err(e) => {
            diags.error("Unable to encode state", e.to_string());
            None
        }
    }
}

/// Read the `id` attribute from state, reporting an error when it is missing
pub fn require_id<'a>(state: &'a Value, diags: &mut Diagnostics) -> Option<&'a str> {
    match state.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Some(id),
        _ => {
            diags.attribute_error(
                "id",
                "Missing resource ID",
                "The state does not contain an \"id\"; import or create the resource first.",
            );
            None
        }
    }
}

/// Read a required string attribute from state
pub fn require_str<'a>(state: &'a Value, name: &str, diags: &mut Diagnostics) -> Option<&'a str> {
    match state.get(name).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            diags.attribute_error(
                name,
                "Missing attribute",
                format!("The state does not contain \"{}\".", name),
            );
            None
        }
    }
}
