//! Origin API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{Origin, OriginRequest};

impl CacheFlyClient {
    /// Get all origins (with pagination)
    pub async fn get_origins(&self, options: &ListOptions) -> Result<Collected<Origin>> {
        let path = format!("/{}", api::ORIGINS);
        self.fetch_all_pages::<Origin, ApiListResponse<Origin>>(&path, options, "origins")
            .await
    }

    /// Get an origin by ID
    pub async fn get_origin(&self, origin_id: &str) -> Result<Option<Origin>> {
        let path = format!("/{}/{}", api::ORIGINS, origin_id);
        self.fetch_resource_by_path::<Origin>(&path, &format!("origin '{}'", origin_id))
            .await
    }

    pub async fn create_origin(&self, request: &OriginRequest) -> Result<Origin> {
        let path = format!("/{}", api::ORIGINS);
        let label = request.name.as_deref().or(request.hostname.as_deref()).unwrap_or("");
        self.post_json(&path, request, &format!("create origin '{}'", label))
            .await
    }

    pub async fn update_origin(&self, origin_id: &str, request: &OriginRequest) -> Result<Origin> {
        let path = format!("/{}/{}", api::ORIGINS, origin_id);
        self.put_json(&path, request, &format!("update origin '{}'", origin_id))
            .await
    }

    /// Delete an origin; `false` if it was already gone
    pub async fn delete_origin(&self, origin_id: &str) -> Result<bool> {
        let path = format!("/{}/{}", api::ORIGINS, origin_id);
        self.delete_by_path(&path, &format!("delete origin '{}'", origin_id))
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
    async fn test_get_origins_type_filter() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/origins"))
            .and(query_param("type", "S3_BUCKET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 1},
                "data": [{"_id": "o1", "type": "S3_BUCKET", "hostname": "b.s3.amazonaws.com"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions::default().with_filters(ListFilters {
            kind: Some("S3_BUCKET".to_string()),
            ..ListFilters::default()
        });
        let collected = client.get_origins(&options).await.unwrap();
        assert_eq!(collected.items.len(), 1);
        assert_eq!(collected.items[0].id, "o1");
    }

    #[tokio::test]
    async fn test_delete_origin() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("DELETE"))
            .and(path("/origins/o1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert!(client.delete_origin("o1").await.unwrap());
    }
}
