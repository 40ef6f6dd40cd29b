//! Log target data models

use serde::{Deserialize, Serialize};

/// Log target as returned by the CacheFly API
///
/// Credentials (`secretKey`, `jsonKey`, `password`, `apiKey`) are write-only.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogTarget {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// S3_BUCKET, GOOGLE_BUCKET or ELASTICSEARCH
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: String,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub access_key: Option<String>,
    pub signature_version: Option<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
    pub index: Option<String>,
    pub user: Option<String>,
    #[serde(default)]
    pub access_logs_services: Vec<String>,
    #[serde(default)]
    pub origin_logs_services: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body of log target create and update requests
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogTargetRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_logs_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_logs_services: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_target_deserialization() {
        let json = r#"{
            "_id": "lt1",
            "type": "ELASTICSEARCH",
            "name": "elk",
            "hosts": ["https://es1:9200", "https://es2:9200"],
            "index": "cdn-logs",
            "accessLogsServices": ["s1"]
        }"#;
        let target: LogTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.kind.as_deref(), Some("ELASTICSEARCH"));
        assert_eq!(target.hosts.len(), 2);
        assert_eq!(target.access_logs_services, vec!["s1".to_string()]);
        assert!(target.origin_logs_services.is_empty());
    }
}
