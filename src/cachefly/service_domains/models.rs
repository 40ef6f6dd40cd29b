//! Service domain data models

use serde::{Deserialize, Serialize};

/// Domain attached to a service
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDomain {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    /// ID of the owning service
    pub service: Option<String>,
    /// HTTP, DNS or MANUAL
    pub validation_mode: Option<String>,
    pub validation_target: Option<String>,
    pub validation_status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body of domain create and update requests
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDomainRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_mode: Option<String>,
}
