//! Delivery region data models

use serde::{Deserialize, Serialize};

/// Delivery region as returned by the CacheFly API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRegion {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}
