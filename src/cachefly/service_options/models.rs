//! Service option metadata models

use serde::{Deserialize, Serialize};

use crate::cachefly::value::OptionMap;

/// Description of one option a service supports
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionMetadata {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Value type as reported by the API (e.g. "boolean", "object")
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

/// Problems found when checking configured options against metadata
#[derive(Debug, Default, PartialEq)]
pub struct OptionCheck {
    pub unknown: Vec<String>,
    pub read_only: Vec<String>,
}

impl OptionCheck {
    pub fn is_ok(&self) -> bool {
        self.unknown.is_empty() && self.read_only.is_empty()
    }
}

/// Check option names against the metadata of a service
pub fn check_options(options: &OptionMap, metadata: &[OptionMetadata]) -> OptionCheck {
    let mut check = OptionCheck::default();
    for name in options.keys() {
        match metadata.iter().find(|m| &m.name == name) {
            None => check.unknown.push(name.clone()),
            Some(meta) if meta.read_only => check.read_only.push(name.clone()),
            Some(_) => {}
        }
    }
    check
}
