//! cachefly_origins data source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::resource::{origin_fields, OriginModel};

/// Lists origins, optionally filtered by type
pub struct OriginsDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct OriginsConfig {
    #[serde(flatten)]
    page: PageConfig,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[async_trait]
impl DataSource for OriginsDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_origins"
    }

    fn schema(&self) -> Schema {
        with_paging(Schema::new("List CacheFly origins."))
            .attribute(
                "type",
                Attribute::optional(AttributeType::String, "Only origins of this type (WEB, S3_BUCKET)."),
            )
            .attribute(
                "origins",
                Attribute::computed(
                    AttributeType::list_of(AttributeType::object(&origin_fields())),
                    "Matching origins.",
                ),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: OriginsConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters {
            kind: parsed.kind,
            ..ListFilters::default()
        });

        let collected = diags.check(client.get_origins(&options).await, "read", self.type_name())?;
        let origins: Vec<OriginModel> = collected.items.into_iter().map(OriginModel::from).collect();
        list_state(config, "origins", &origins, collected.total, diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_origins_with_type_and_offset() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/origins"))
            .and(query_param("offset", "10"))
            .and(query_param("limit", "100"))
            .and(query_param("type", "WEB"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"offset": 10, "limit": 100, "count": 12},
                "data": [
                    {"_id": "o11", "type": "WEB", "hostname": "a.example.com"},
                    {"_id": "o12", "type": "WEB", "hostname": "b.example.com"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = OriginsDataSource
            .read(&client, &json!({"type": "WEB", "offset": 10}), &mut diags)
            .await
            .unwrap();

        assert_eq!(state["origins"].as_array().unwrap().len(), 2);
        assert_eq!(state["origins"][0]["type"], "WEB");
        assert!(state["origins"][0].get("secret_key").is_none());
        assert_eq!(state["total_count"], 12);
    }

    #[tokio::test]
    async fn test_read_origins_timeout() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/origins"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"meta": {"count": 0}, "data": []}))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let result = OriginsDataSource
            .read(&client, &json!({"timeout_seconds": 1}), &mut diags)
            .await;

        assert!(result.is_none());
        assert!(diags.iter().next().unwrap().detail.contains("Timed out"));
    }
}
