//! cachefly_log_targets data source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::resource::{log_target_fields, LogTargetModel};

/// Lists log targets, optionally filtered by type
pub struct LogTargetsDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct LogTargetsConfig {
    #[serde(flatten)]
    page: PageConfig,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[async_trait]
impl DataSource for LogTargetsDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_log_targets"
    }

    fn schema(&self) -> Schema {
        with_paging(Schema::new("List CacheFly log targets."))
            .attribute(
                "type",
                Attribute::optional(AttributeType::String, "Only targets of this type."),
            )
            .attribute(
                "log_targets",
                Attribute::computed(
                    AttributeType::list_of(AttributeType::object(&log_target_fields())),
                    "Matching log targets.",
                ),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: LogTargetsConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters {
            kind: parsed.kind,
            ..ListFilters::default()
        });

        let collected = diags.check(client.get_log_targets(&options).await, "read", self.type_name())?;
        let targets: Vec<LogTargetModel> = collected.items.into_iter().map(LogTargetModel::from).collect();
        list_state(config, "log_targets", &targets, collected.total, diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_log_targets_short_page_stops() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/logtargets"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 0},
                "data": [
                    {"_id": "lt1", "name": "a"},
                    {"_id": "lt2", "name": "b"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = LogTargetsDataSource
            .read(&client, &json!({"limit": 5}), &mut diags)
            .await
            .unwrap();

        assert_eq!(state["log_targets"].as_array().unwrap().len(), 2);
        assert_eq!(state["total_count"], 0);
    }
}
