//! cachefly_script_config resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{decode_value, encode_value, ScriptConfig, ScriptConfigRequest};

const TYPE_NAME: &str = "cachefly_script_config";

/// State of a script config as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
struct ScriptConfigModel {
    id: Option<String>,
    name: String,
    script_config_definition: Option<String>,
    mime_type: String,
    value: String,
    services: Option<Vec<String>>,
    activated: Option<bool>,
    purpose: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl ScriptConfigModel {
    fn refreshed(config: ScriptConfig, known: Option<&ScriptConfigModel>) -> Self {
        Self {
            value: decode_value(&config.value, known.map(|k| k.value.as_str())),
            id: Some(config.id),
            name: config.name,
            script_config_definition: config.script_config_definition,
            mime_type: config
                .mime_type
                .or_else(|| known.map(|k| k.mime_type.clone()))
                .unwrap_or_default(),
            services: Some(config.services),
            activated: config.activated,
            purpose: config.purpose,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }

    fn request(&self, diags: &mut Diagnostics) -> Option<ScriptConfigRequest> {
        let value = match encode_value(&self.mime_type, &self.value) {
            Ok(value) => value,
            Err(e) => {
                diags.attribute_error(
                    "value",
                    "Invalid script config value",
                    format!("mime_type is {} but value is not valid JSON: {}", self.mime_type, e),
                );
                return None;
            }
        };

        Some(ScriptConfigRequest {
            name: self.name.clone(),
            services: self.services.clone(),
            script_config_definition: self.script_config_definition.clone(),
            mime_type: self.mime_type.clone(),
            value,
        })
    }
}

/// Apply the planned activation state if it differs from the current one
///
/// On failure the error is recorded and the config is returned as it was.
async fn sync_activation(
    client: &CacheFlyClient,
    config: ScriptConfig,
    wanted: Option<bool>,
    diags: &mut Diagnostics,
) -> ScriptConfig {
    let synced = match wanted {
        Some(true) if config.activated != Some(true) => diags.check(
            client.activate_script_config(&config.id).await,
            "activate",
            TYPE_NAME,
        ),
        Some(false) if config.activated != Some(false) => diags.check(
            client.deactivate_script_config(&config.id).await,
            "deactivate",
            TYPE_NAME,
        ),
        _ => None,
    };
    synced.unwrap_or(config)
}

/// Manages a script config
pub struct ScriptConfigResource;

#[async_trait]
impl Resource for ScriptConfigResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("An edge script configuration document attached to services.")
            .attribute("id", Attribute::computed(AttributeType::String, "Script config ID."))
            .attribute("name", Attribute::required(AttributeType::String, "Display name."))
            .attribute(
                "script_config_definition",
                Attribute::required(
                    AttributeType::String,
                    "ID of the script config definition.",
                )
                .requires_replace(),
            )
            .attribute(
                "mime_type",
                Attribute::required(
                    AttributeType::String,
                    "Mime type of the value. JSON mime types require a JSON document.",
                ),
            )
            .attribute(
                "value",
                Attribute::required(AttributeType::String, "Configuration document as text."),
            )
            .attribute(
                "services",
                Attribute::optional_computed(
                    AttributeType::list_of(AttributeType::String),
                    "IDs of services using the config.",
                ),
            )
            .attribute(
                "activated",
                Attribute::optional_computed(AttributeType::Bool, "Whether the config is active."),
            )
            .attribute("purpose", Attribute::computed(AttributeType::String, "Purpose of the definition."))
            .attribute(
                "created_at",
                Attribute::computed(AttributeType::String, "Creation timestamp."),
            )
            .attribute(
                "updated_at",
                Attribute::computed(AttributeType::String, "Last update timestamp."),
            )
    }

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let plan: ScriptConfigModel = decode(plan, "configuration", diags)?;
        let request = plan.request(diags)?;

        let config = diags.check(client.create_script_config(&request).await, "create", TYPE_NAME)?;
        let config = sync_activation(client, config, plan.activated, diags).await;
        encode(&ScriptConfigModel::refreshed(config, Some(&plan)), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let known: ScriptConfigModel = decode(state, "state", diags)?;
        match diags.check(client.get_script_config(id).await, "read", TYPE_NAME)? {
            Some(config) => encode(&ScriptConfigModel::refreshed(config, Some(&known)), diags)
                .map(ResourceState::Present),
            None => Some(ResourceState::Removed),
        }
    }

    async fn update(
        &self,
        client: &CacheFlyClient,
        prior: &Value,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let id = require_id(prior, diags)?;
        let plan: ScriptConfigModel = decode(plan, "configuration", diags)?;
        let request = ScriptConfigRequest {
            script_config_definition: None,
            ..plan.request(diags)?
        };

        let config = diags.check(
            client.update_script_config(id, &request).await,
            "update",
            TYPE_NAME,
        )?;
        let config = sync_activation(client, config, plan.activated, diags).await;
        encode(&ScriptConfigModel::refreshed(config, Some(&plan)), diags)
    }

    /// Script configs cannot be deleted through the API; they are deactivated.
    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        match client.deactivate_script_config(id).await {
            Ok(_) => Some(()),
            Err(e) if e.is_not_found() => Some(()),
            Err(e) => {
                diags.api_error("delete", TYPE_NAME, &e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_json_document_and_activate() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/scriptConfigs"))
            .and(body_json(json!({
                "name": "redirects",
                "scriptConfigDefinition": "def1",
                "mimeType": "application/json",
                "value": {"rules": [{"from": "/a", "to": "/b"}]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "sc1",
                "name": "redirects",
                "scriptConfigDefinition": "def1",
                "mimeType": "application/json",
                "value": {"rules": [{"from": "/a", "to": "/b"}]},
                "activated": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/scriptConfigs/sc1/activate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "sc1",
                "name": "redirects",
                "scriptConfigDefinition": "def1",
                "mimeType": "application/json",
                "value": {"rules": [{"from": "/a", "to": "/b"}]},
                "activated": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let value = "{ \"rules\": [ { \"from\": \"/a\", \"to\": \"/b\" } ] }";
        let mut diags = Diagnostics::new();
        let state = ScriptConfigResource
            .create(
                &client,
                &json!({
                    "name": "redirects",
                    "script_config_definition": "def1",
                    "mime_type": "application/json",
                    "value": value,
                    "activated": true
                }),
                &mut diags,
            )
            .await
            .unwrap();

        assert_eq!(state["value"], value);
        assert_eq!(state["activated"], true);
    }

    #[tokio::test]
    async fn test_create_keeps_state_when_activation_fails() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/scriptConfigs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "sc1",
                "name": "banner",
                "scriptConfigDefinition": "def1",
                "mimeType": "text/plain",
                "value": "hello",
                "activated": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/scriptConfigs/sc1/activate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = ScriptConfigResource
            .create(
                &client,
                &json!({
                    "name": "banner",
                    "script_config_definition": "def1",
                    "mime_type": "text/plain",
                    "value": "hello",
                    "activated": true
                }),
                &mut diags,
            )
            .await
            .unwrap();

        assert_eq!(state["id"], "sc1");
        assert_eq!(state["activated"], false);
        assert_eq!(diags.error_count(), 1);
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Unable to activate cachefly_script_config"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_json_before_request() {
        let client = CacheFlyClient::test_client("http://mock");
        let mut diags = Diagnostics::new();
        let result = ScriptConfigResource
            .create(
                &client,
                &json!({
                    "name": "broken",
                    "script_config_definition": "def1",
                    "mime_type": "application/json",
                    "value": "{oops"
                }),
                &mut diags,
            )
            .await;

        assert!(result.is_none());
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("value"));
    }
}
