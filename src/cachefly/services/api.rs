//! Service API operations

use log::debug;

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListFilters, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{Service, ServiceCreateRequest, ServiceUpdateRequest};

impl CacheFlyClient {
    /// Get all services matching the options (with pagination)
    pub async fn get_services(&self, options: &ListOptions) -> Result<Collected<Service>> {
        let path = format!("/{}", api::SERVICES);
        self.fetch_all_pages::<Service, ApiListResponse<Service>>(&path, options, "services")
            .await
    }

    /// Get a service by ID
    pub async fn get_service(&self, service_id: &str) -> Result<Option<Service>> {
        let path = format!("/{}/{}", api::SERVICES, service_id);
        self.fetch_resource_by_path::<Service>(&path, &format!("service '{}'", service_id))
            .await
    }

    /// Find a service by its unique name
    ///
    /// The list endpoint only supports a substring search, so the results are
    /// narrowed to the exact match.
    pub async fn get_service_by_unique_name(&self, unique_name: &str) -> Result<Option<Service>> {
        let options = ListOptions::default().with_filters(ListFilters {
            search: Some(unique_name.to_string()),
            response_type: Some("shallow".to_string()),
            ..ListFilters::default()
        });
        let collected = self.get_services(&options).await?;
        debug!(
            "Search for '{}' returned {} services",
            unique_name,
            collected.items.len()
        );

        Ok(collected
            .items
            .into_iter()
            .find(|s| s.unique_name == unique_name))
    }

    /// Create a service
    pub async fn create_service(&self, request: &ServiceCreateRequest) -> Result<Service> {
        let path = format!("/{}", api::SERVICES);
        self.post_json(
            &path,
            request,
            &format!("create service '{}'", request.unique_name),
        )
        .await
    }

    /// Update a service
    pub async fn update_service(
        &self,
        service_id: &str,
        request: &ServiceUpdateRequest,
    ) -> Result<Service> {
        let path = format!("/{}/{}", api::SERVICES, service_id);
        self.put_json(&path, request, &format!("update service '{}'", service_id))
            .await
    }

    /// Activate a service
    pub async fn activate_service(&self, service_id: &str) -> Result<Service> {
        let path = format!("/{}/{}/activate", api::SERVICES, service_id);
        self.put_action(&path, &format!("activate service '{}'", service_id))
            .await
    }

    /// Deactivate a service
    pub async fn deactivate_service(&self, service_id: &str) -> Result<Service> {
        let path = format!("/{}/{}/deactivate", api::SERVICES, service_id);
        self.put_action(&path, &format!("deactivate service '{}'", service_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_json(id: &str, unique_name: &str) -> serde_json::Value {
        json!({"_id": id, "name": unique_name, "uniqueName": unique_name, "status": "ACTIVE"})
    }

    #[tokio::test]
    async fn test_get_services_with_status_filter() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services"))
            .and(query_param("status", "ACTIVE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"offset": 0, "limit": 100, "count": 2},
                "data": [service_json("s1", "alpha"), service_json("s2", "beta")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions::default().with_filters(ListFilters {
            status: Some("ACTIVE".to_string()),
            ..ListFilters::default()
        });
        let collected = client.get_services(&options).await.unwrap();
        assert_eq!(collected.items.len(), 2);
        assert_eq!(collected.total, 2);
    }

    #[tokio::test]
    async fn test_get_service_by_unique_name_exact_match() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services"))
            .and(query_param("search", "shop"))
            .and(query_param("responseType", "shallow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 2},
                "data": [service_json("s1", "shop-staging"), service_json("s2", "shop")]
            })))
            .mount(&mock_server)
            .await;

        let service = client.get_service_by_unique_name("shop").await.unwrap().unwrap();
        assert_eq!(service.id, "s2");
    }

    #[tokio::test]
    async fn test_get_service_by_unique_name_no_match() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 1},
                "data": [service_json("s1", "shop-staging")]
            })))
            .mount(&mock_server)
            .await;

        assert!(client.get_service_by_unique_name("shop").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_service_body() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/services"))
            .and(body_json(json!({"name": "Docs", "uniqueName": "docs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_json("s9", "docs")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = client
            .create_service(&ServiceCreateRequest {
                name: "Docs".to_string(),
                unique_name: "docs".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(service.id, "s9");
    }

    #[tokio::test]
    async fn test_deactivate_service() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("PUT"))
            .and(path("/services/s1/deactivate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "s1", "name": "a", "uniqueName": "a", "status": "DEACTIVATED"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = client.deactivate_service("s1").await.unwrap();
        assert!(!service.is_active());
    }

    #[tokio::test]
    async fn test_get_service_error_message() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services/s1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})))
            .mount(&mock_server)
            .await;

        let err = client.get_service("s1").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("fetch service 's1': Invalid token"));
    }
}
