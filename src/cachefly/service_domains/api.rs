//! Service domain API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{ServiceDomain, ServiceDomainRequest};

fn domains_path(service_id: &str) -> String {
    format!("/{}/{}/{}", api::SERVICES, service_id, api::DOMAINS)
}

fn domain_path(service_id: &str, domain_id: &str) -> String {
    format!("{}/{}", domains_path(service_id), domain_id)
}

impl CacheFlyClient {
    /// Get all domains of a service (with pagination)
    pub async fn get_service_domains(
        &self,
        service_id: &str,
        options: &ListOptions,
    ) -> Result<Collected<ServiceDomain>> {
        let error_context = format!("domains for service '{}'", service_id);
        self.fetch_all_pages::<ServiceDomain, ApiListResponse<ServiceDomain>>(
            &domains_path(service_id),
            options,
            &error_context,
        )
        .await
    }

    pub async fn get_service_domain(
        &self,
        service_id: &str,
        domain_id: &str,
    ) -> Result<Option<ServiceDomain>> {
        self.fetch_resource_by_path::<ServiceDomain>(
            &domain_path(service_id, domain_id),
            &format!("domain '{}' of service '{}'", domain_id, service_id),
        )
        .await
    }

    pub async fn create_service_domain(
        &self,
        service_id: &str,
        request: &ServiceDomainRequest,
    ) -> Result<ServiceDomain> {
        self.post_json(
            &domains_path(service_id),
            request,
            &format!("add domain '{}' to service '{}'", request.name, service_id),
        )
        .await
    }

    pub async fn update_service_domain(
        &self,
        service_id: &str,
        domain_id: &str,
        request: &ServiceDomainRequest,
    ) -> Result<ServiceDomain> {
        self.put_json(
            &domain_path(service_id, domain_id),
            request,
            &format!("update domain '{}'", domain_id),
        )
        .await
    }

    /// Remove a domain from a service; `false` if it was already gone
    pub async fn delete_service_domain(&self, service_id: &str, domain_id: &str) -> Result<bool> {
        self.delete_by_path(
            &domain_path(service_id, domain_id),
            &format!("delete domain '{}'", domain_id),
        )
        .await
    }

    /// Tell CacheFly the domain is ready to be validated
    pub async fn signal_domain_validation_ready(
        &self,
        service_id: &str,
        domain_id: &str,
    ) -> Result<ServiceDomain> {
        let path = format!(
            "{}/signals/validationReady",
            domain_path(service_id, domain_id)
        );
        self.put_action(&path, &format!("signal validation ready for domain '{}'", domain_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cachefly::ListFilters;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_service_domains_search() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services/s1/domains"))
            .and(query_param("search", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 1},
                "data": [{"_id": "d1", "name": "cdn.example.com"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions::default().with_filters(ListFilters {
            search: Some("example.com".to_string()),
            ..ListFilters::default()
        });
        let collected = client.get_service_domains("s1", &options).await.unwrap();
        assert_eq!(collected.items[0].name, "cdn.example.com");
    }

    #[tokio::test]
    async fn test_missing_service_fails_first_page() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services/nope/domains"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Service not found"})))
            .mount(&mock_server)
            .await;

        let err = client
            .get_service_domains("nope", &ListOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("domains for service 'nope' at offset 0"));
    }

    #[tokio::test]
    async fn test_signal_validation_ready() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("PUT"))
            .and(path("/services/s1/domains/d1/signals/validationReady"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "d1", "name": "cdn.example.com", "validationStatus": "VALIDATING"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let domain = client.signal_domain_validation_ready("s1", "d1").await.unwrap();
        assert_eq!(domain.validation_status.as_deref(), Some("VALIDATING"));
    }
}
