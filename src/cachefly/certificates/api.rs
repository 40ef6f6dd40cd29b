//! Certificate API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{Certificate, CertificateCreateRequest};

impl CacheFlyClient {
    /// Get all certificates (with pagination)
    pub async fn get_certificates(&self, options: &ListOptions) -> Result<Collected<Certificate>> {
        let path = format!("/{}", api::CERTIFICATES);
        self.fetch_all_pages::<Certificate, ApiListResponse<Certificate>>(
            &path,
            options,
            "certificates",
        )
        .await
    }

    pub async fn get_certificate(&self, certificate_id: &str) -> Result<Option<Certificate>> {
        let path = format!("/{}/{}", api::CERTIFICATES, certificate_id);
        self.fetch_resource_by_path::<Certificate>(
            &path,
            &format!("certificate '{}'", certificate_id),
        )
        .await
    }

    /// Upload a certificate and its private key
    pub async fn create_certificate(&self, request: &CertificateCreateRequest) -> Result<Certificate> {
        let path = format!("/{}", api::CERTIFICATES);
        self.post_json(&path, request, "upload certificate").await
    }

    pub async fn delete_certificate(&self, certificate_id: &str) -> Result<bool> {
        let path = format!("/{}/{}", api::CERTIFICATES, certificate_id);
        self.delete_by_path(&path, &format!("delete certificate '{}'", certificate_id))
            .await
    }
}
