//! Certificate data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// TLS certificate as returned by the CacheFly API
///
/// The certificate body and private key are write-only.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub subject_common_name: String,
    #[serde(default)]
    pub subject_names: Vec<String>,
    pub expired: Option<bool>,
    pub expiring: Option<bool>,
    pub in_use: Option<bool>,
    pub managed: Option<bool>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub created_at: Option<String>,
}

impl Certificate {
    /// Expiry time, if the API reported a parseable `notAfter`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.not_after
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whole days from `now` until expiry; negative once expired
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at().map(|expiry| (expiry - now).num_days())
    }
}

/// Body of `POST /certificates`
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CertificateCreateRequest {
    pub certificate: String,
    pub certificate_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn certificate(not_after: Option<&str>) -> Certificate {
        Certificate {
            id: "c1".to_string(),
            subject_common_name: "*.example.com".to_string(),
            not_after: not_after.map(str::to_string),
            ..Certificate::default()
        }
    }

    #[test]
    fn test_days_until_expiry() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let cert = certificate(Some("2025-01-31T12:00:00.000Z"));
        assert_eq!(cert.days_until_expiry(now), Some(30));
    }

    #[test]
    fn test_days_until_expiry_negative_when_expired() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let cert = certificate(Some("2025-02-27T00:00:00Z"));
        assert_eq!(cert.days_until_expiry(now), Some(-2));
    }

    #[test]
    fn test_days_until_expiry_unparseable() {
        let now = Utc::now();
        assert_eq!(certificate(None).days_until_expiry(now), None);
        assert_eq!(certificate(Some("next year")).days_until_expiry(now), None);
    }

    #[test]
    fn test_certificate_deserialization() {
        let json = r#"{
            "_id": "c1",
            "subjectCommonName": "www.example.com",
            "subjectNames": ["www.example.com", "example.com"],
            "expired": false,
            "inUse": true,
            "notAfter": "2026-06-01T00:00:00.000Z"
        }"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.name(), "www.example.com");
        assert_eq!(cert.subject_names.len(), 2);
        assert!(cert.expires_at().is_some());
    }
}
