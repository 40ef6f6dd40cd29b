//! Origin data models

use serde::{Deserialize, Serialize};

/// Origin as returned by the CacheFly API
///
/// `secretKey` is write-only and never comes back from the API.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// WEB or S3_BUCKET
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub hostname: Option<String>,
    /// HTTP, HTTPS or FOLLOW
    pub scheme: Option<String>,
    pub cache_by_query_param: Option<bool>,
    pub gzip: Option<bool>,
    pub ttl: Option<i64>,
    pub missed_ttl: Option<i64>,
    pub connection_timeout: Option<i64>,
    pub time_to_first_byte: Option<i64>,
    pub access_key: Option<String>,
    pub region: Option<String>,
    pub signature_version: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body of `POST /origins` and `PUT /origins/{id}`
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_by_query_param: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_byte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_version: Option<String>,
}
