//! Service data models

use serde::{Deserialize, Serialize};

/// Service as returned by the CacheFly API
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unique_name: String,
    pub description: Option<String>,
    pub auto_ssl: Option<bool>,
    pub configuration_mode: Option<String>,
    pub tls_profile: Option<String>,
    /// ACTIVE or DEACTIVATED
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Service {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("ACTIVE")
    }
}

/// Body of `POST /services`
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreateRequest {
    pub name: String,
    pub unique_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /services/{id}`
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_profile: Option<String>,
}

impl ServiceUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.auto_ssl.is_none()
            && self.configuration_mode.is_none()
            && self.tls_profile.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_deserialization() {
        let json = r#"{
            "_id": "5f1a2b3c",
            "name": "Marketing site",
            "uniqueName": "marketing-site",
            "autoSsl": true,
            "configurationMode": "API_RULES_AND_OPTIONS",
            "status": "ACTIVE",
            "createdAt": "2024-02-01T10:00:00.000Z"
        }"#;

        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.id, "5f1a2b3c");
        assert_eq!(service.unique_name, "marketing-site");
        assert_eq!(service.auto_ssl, Some(true));
        assert!(service.is_active());
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let request = ServiceUpdateRequest {
            auto_ssl: Some(false),
            ..ServiceUpdateRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"autoSsl": false}));
        assert!(!request.is_empty());
        assert!(ServiceUpdateRequest::default().is_empty());
    }
}
