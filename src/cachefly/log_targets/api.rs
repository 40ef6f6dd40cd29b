//! Log target API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{LogTarget, LogTargetRequest};

impl CacheFlyClient {
    /// Get all log targets (with pagination)
    pub async fn get_log_targets(&self, options: &ListOptions) -> Result<Collected<LogTarget>> {
        let path = format!("/{}", api::LOG_TARGETS);
        self.fetch_all_pages::<LogTarget, ApiListResponse<LogTarget>>(&path, options, "log targets")
            .await
    }

    pub async fn get_log_target(&self, target_id: &str) -> Result<Option<LogTarget>> {
        let path = format!("/{}/{}", api::LOG_TARGETS, target_id);
        self.fetch_resource_by_path::<LogTarget>(&path, &format!("log target '{}'", target_id))
            .await
    }

    pub async fn create_log_target(&self, request: &LogTargetRequest) -> Result<LogTarget> {
        let path = format!("/{}", api::LOG_TARGETS);
        self.post_json(&path, request, &format!("create log target '{}'", request.name))
            .await
    }

    pub async fn update_log_target(
        &self,
        target_id: &str,
        request: &LogTargetRequest,
    ) -> Result<LogTarget> {
        let path = format!("/{}/{}", api::LOG_TARGETS, target_id);
        self.put_json(&path, request, &format!("update log target '{}'", target_id))
            .await
    }

    pub async fn delete_log_target(&self, target_id: &str) -> Result<bool> {
        let path = format!("/{}/{}", api::LOG_TARGETS, target_id);
        self.delete_by_path(&path, &format!("delete log target '{}'", target_id))
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
    async fn test_get_log_targets_uses_logtargets_path() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/logtargets"))
            .and(query_param("type", "S3_BUCKET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 1},
                "data": [{"_id": "lt1", "type": "S3_BUCKET", "name": "archive", "bucket": "logs"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions::default().with_filters(ListFilters {
            kind: Some("S3_BUCKET".to_string()),
            ..ListFilters::default()
        });
        let collected = client.get_log_targets(&options).await.unwrap();
        assert_eq!(collected.items[0].bucket.as_deref(), Some("logs"));
    }

    #[tokio::test]
    async fn test_update_log_target_error() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("PUT"))
            .and(path("/logtargets/lt1"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bucket is required"})))
            .mount(&mock_server)
            .await;

        let request = LogTargetRequest {
            name: "archive".to_string(),
            ..LogTargetRequest::default()
        };
        let err = client.update_log_target("lt1", &request).await.unwrap_err();
        assert!(err.to_string().contains("update log target 'lt1': bucket is required"));
    }
}
