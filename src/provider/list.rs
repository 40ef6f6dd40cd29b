//! Shared plumbing for list data sources

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, AttributeType, Schema};
use crate::cachefly::{ListFilters, ListOptions};

/// Paging attributes accepted by every list data source
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub timeout_seconds: Option<i64>,
}

impl PageConfig {
    /// Build collector options from the paging attributes and `filters`
    pub fn list_options(&self, filters: ListFilters) -> ListOptions {
        let options = ListOptions::from_raw(self.offset, self.limit).with_filters(filters);
        match self.timeout_seconds {
            Some(secs) if secs > 0 => options.with_timeout(Duration::from_secs(secs as u64)),
            _ => options,
        }
    }
}

/// Add the paging attributes and `total_count` to a list data source schema
pub fn with_paging(schema: Schema) -> Schema {
    schema
        .attribute(
            "offset",
            Attribute::optional(
                AttributeType::Int,
                "Offset of the first record to fetch. Defaults to 0.",
            ),
        )
        .attribute(
            "limit",
            Attribute::optional(
                AttributeType::Int,
                "Records requested per page. Defaults to 100; all pages are fetched.",
            ),
        )
        .attribute(
            "timeout_seconds",
            Attribute::optional(
                AttributeType::Int,
                "Deadline for fetching all pages. No deadline when unset.",
            ),
        )
        .attribute(
            "total_count",
            Attribute::computed(
                AttributeType::Int,
                "Total reported by the API, or 0 when the API does not report one.",
            ),
        )
}

/// Build the state of a list data source
///
/// The configuration is echoed back with `items_key` set to the collected
/// items and `total_count` to the reported total.
pub fn list_state<S: Serialize>(
    config: &Value,
    items_key: &str,
    items: &[S],
    total: u32,
    diags: &mut Diagnostics,
) -> Option<Value> {
    let items = match serde_json::to_value(items) {
        Ok(items) => items,
        Err(e) => {
            diags.error("Unable to encode state", e.to_string());
            return None;
        }
    };

    let mut state = match config {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    state.insert(items_key.to_string(), items);
    state.insert("total_count".to_string(), Value::from(total));
    Some(Value::Object(state))
}
