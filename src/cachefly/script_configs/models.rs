//! Script config data models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Script config as returned by the CacheFly API
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub services: Vec<String>,
    /// ID of the script config definition this config instantiates
    pub script_config_definition: Option<String>,
    pub mime_type: Option<String>,
    /// Document body; JSON for JSON mime types, a string otherwise
    #[serde(default)]
    pub value: Value,
    pub purpose: Option<String>,
    pub activated: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body of script config create and update requests
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfigRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_config_definition: Option<String>,
    pub mime_type: String,
    pub value: Value,
}

fn is_json_mime_type(mime_type: &str) -> bool {
    mime_type.to_ascii_lowercase().contains("json")
}

/// Turn a configured text value into the wire value for `mime_type`
///
/// JSON mime types must carry a valid JSON document; anything else is sent
/// as a plain string.
pub fn encode_value(mime_type: &str, text: &str) -> Result<Value> {
    if is_json_mime_type(mime_type) {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(Value::String(text.to_string()))
    }
}

/// Turn a wire value back into text, keeping `known` when it is equivalent
///
/// This keeps the user's formatting of JSON documents stable across refreshes.
pub fn decode_value(value: &Value, known: Option<&str>) -> String {
    if let Some(known) = known {
        let equivalent = match value {
            Value::String(s) => s == known,
            other => serde_json::from_str::<Value>(known)
                .map(|parsed| &parsed == other)
                .unwrap_or(false),
        };
        if equivalent {
            return known.to_string();
        }
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
