//! Schema declarations for the provider, resources and data sources

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::diagnostics::Diagnostics;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int,
    Float,
    List(Box<AttributeType>),
    Object(BTreeMap<String, AttributeType>),
    /// Any JSON value (schema-less option bags)
    Dynamic,
}

impl AttributeType {
    pub fn list_of(element: AttributeType) -> Self {
        AttributeType::List(Box::new(element))
    }

    /// Object type from `(name, type)` pairs
    pub fn object(fields: &[(&str, AttributeType)]) -> Self {
        AttributeType::Object(
            fields
                .iter()
                .map(|(name, kind)| (name.to_string(), kind.clone()))
                .collect(),
        )
    }

    /// Check whether a non-null JSON value has this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (AttributeType::Dynamic, _) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Bool, Value::Bool(_)) => true,
            (AttributeType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (AttributeType::Float, Value::Number(_)) => true,
            (AttributeType::List(element), Value::Array(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (AttributeType::Object(fields), Value::Object(map)) => map.iter().all(|(k, v)| {
                fields.get(k).map(|kind| kind.accepts(v)).unwrap_or(false)
            }),
            _ => false,
        }
    }

    /// Human-readable type name
    pub fn describe(&self) -> String {
        match self {
            AttributeType::String => "string".to_string(),
            AttributeType::Bool => "bool".to_string(),
            AttributeType::Int => "number (integer)".to_string(),
            AttributeType::Float => "number".to_string(),
            AttributeType::List(element) => format!("list of {}", element.describe()),
            AttributeType::Object(_) => "object".to_string(),
            AttributeType::Dynamic => "dynamic".to_string(),
        }
    }
}

/// How an attribute may be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

impl AttributeMode {
    /// Whether configuration may set the attribute
    pub fn is_configurable(&self) -> bool {
        !matches!(self, AttributeMode::Computed)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One attribute of a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub mode: AttributeMode,
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub sensitive: bool,
    /// Changing the attribute replaces the remote object
    #[serde(skip_serializing_if = "is_false")]
    pub requires_replace: bool,
}

impl Attribute {
    fn new(kind: AttributeType, mode: AttributeMode, description: &str) -> Self {
        Self {
            kind,
            mode,
            description: description.to_string(),
            sensitive: false,
            requires_replace: false,
        }
    }

    pub fn required(kind: AttributeType, description: &str) -> Self {
        Self::new(kind, AttributeMode::Required, description)
    }

    pub fn optional(kind: AttributeType, description: &str) -> Self {
        Self::new(kind, AttributeMode::Optional, description)
    }

    pub fn computed(kind: AttributeType, description: &str) -> Self {
        Self::new(kind, AttributeMode::Computed, description)
    }

    pub fn optional_computed(kind: AttributeType, description: &str) -> Self {
        Self::new(kind, AttributeMode::OptionalComputed, description)
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }
}

/// Schema of the provider, a resource or a data source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of sensitive attributes
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Validate a configuration object against the schema
    ///
    /// Reports missing required attributes, unknown attributes, attempts to
    /// set computed-only attributes and type mismatches. `null` counts as
    /// unset.
    pub fn validate_config(&self, config: &Value, diags: &mut Diagnostics) {
        let empty = serde_json::Map::new();
        let fields = match config {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                diags.error(
                    "Invalid configuration",
                    "Configuration must be a JSON object",
                );
                return;
            }
        };

        for (name, attribute) in &self.attributes {
            let is_set = fields.get(name).map(|v| !v.is_null()).unwrap_or(false);
            if attribute.mode == AttributeMode::Required && !is_set {
                diags.attribute_error(
                    name.as_str(),
                    "Missing required argument",
                    format!("The argument \"{}\" is required, but no definition was found.", name),
                );
            }
        }

        for (name, value) in fields {
            let Some(attribute) = self.attributes.get(name) else {
                diags.attribute_error(
                    name.as_str(),
                    "Unsupported argument",
                    format!("An argument named \"{}\" is not expected here.", name),
                );
                continue;
            };

            if value.is_null() {
                continue;
            }

            if !attribute.mode.is_configurable() {
                diags.attribute_error(
                    name.as_str(),
                    "Invalid configuration",
                    format!("\"{}\" is computed and cannot be set in configuration.", name),
                );
                continue;
            }

            if !attribute.kind.accepts(value) {
                diags.attribute_error(
                    name.as_str(),
                    "Incorrect attribute value type",
                    format!(
                        "Inappropriate value for attribute \"{}\": {} required.",
                        name,
                        attribute.kind.describe()
                    ),
                );
            }
        }
    }

    /// Attributes marked `requires_replace` whose configured value differs
    /// from the prior state
    pub fn replacement_changes(&self, prior: &Value, config: &Value) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.requires_replace)
            .filter_map(|(name, _)| {
                let planned = config.get(name).filter(|v| !v.is_null())?;
                let current = prior.get(name).unwrap_or(&Value::Null);
                (planned != current).then(|| name.clone())
            })
            .collect()
    }
}
