//! cachefly_service resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{
    Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema,
};

use super::models::{Service, ServiceCreateRequest, ServiceUpdateRequest};

const TYPE_NAME: &str = "cachefly_service";

/// State of a service as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(super) struct ServiceModel {
    pub id: Option<String>,
    pub name: String,
    pub unique_name: String,
    pub description: Option<String>,
    pub auto_ssl: Option<bool>,
    pub configuration_mode: Option<String>,
    pub tls_profile: Option<String>,
    pub active: Option<bool>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Service> for ServiceModel {
    fn from(service: Service) -> Self {
        Self {
            active: Some(service.is_active()),
            id: Some(service.id),
            name: service.name,
            unique_name: service.unique_name,
            description: service.description,
            auto_ssl: service.auto_ssl,
            configuration_mode: service.configuration_mode,
            tls_profile: service.tls_profile,
            status: service.status,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

impl ServiceModel {
    fn update_request(&self) -> ServiceUpdateRequest {
        ServiceUpdateRequest {
            description: self.description.clone(),
            auto_ssl: self.auto_ssl,
            configuration_mode: self.configuration_mode.clone(),
            tls_profile: self.tls_profile.clone(),
        }
    }
}

/// Computed attributes shared by the resource and the data sources
pub(super) fn service_attributes(schema: Schema) -> Schema {
    schema
        .attribute(
            "status",
            Attribute::computed(AttributeType::String, "ACTIVE or DEACTIVATED."),
        )
        .attribute(
            "created_at",
            Attribute::computed(AttributeType::String, "Creation timestamp."),
        )
        .attribute(
            "updated_at",
            Attribute::computed(AttributeType::String, "Last update timestamp."),
        )
}

/// Manages a CacheFly service
///
/// The API has no delete endpoint for services; destroying the resource
/// deactivates the service instead.
pub struct ServiceResource;

#[async_trait]
impl Resource for ServiceResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        service_attributes(Schema::new("A CacheFly CDN service."))
            .attribute("id", Attribute::computed(AttributeType::String, "Service ID."))
            .attribute(
                "name",
                Attribute::required(AttributeType::String, "Display name.").requires_replace(),
            )
            .attribute(
                "unique_name",
                Attribute::required(
                    AttributeType::String,
                    "Unique name; used in the service's default hostname.",
                )
                .requires_replace(),
            )
            .attribute(
                "description",
                Attribute::optional(AttributeType::String, "Free-text description."),
            )
            .attribute(
                "auto_ssl",
                Attribute::optional_computed(
                    AttributeType::Bool,
                    "Issue certificates automatically for the service's domains.",
                ),
            )
            .attribute(
                "configuration_mode",
                Attribute::optional_computed(
                    AttributeType::String,
                    "Configuration mode (e.g. API_RULES_AND_OPTIONS).",
                ),
            )
            .attribute(
                "tls_profile",
                Attribute::optional_computed(AttributeType::String, "TLS profile name."),
            )
            .attribute(
                "active",
                Attribute::optional_computed(
                    AttributeType::Bool,
                    "Whether the service is active. Defaults to true.",
                ),
            )
    }

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let plan: ServiceModel = decode(plan, "configuration", diags)?;

        let request = ServiceCreateRequest {
            name: plan.name.clone(),
            unique_name: plan.unique_name.clone(),
            description: plan.description.clone(),
        };
        let mut service = diags.check(client.create_service(&request).await, "create", TYPE_NAME)?;

        // The service exists from here on; follow-up failures still yield state.
        let mut configured = true;
        let update = ServiceUpdateRequest {
            description: None,
            ..plan.update_request()
        };
        if !update.is_empty() {
            match diags.check(
                client.update_service(&service.id, &update).await,
                "configure new",
                TYPE_NAME,
            ) {
                Some(updated) => service = updated,
                None => configured = false,
            }
        }

        if configured && plan.active == Some(false) && service.is_active() {
            if let Some(deactivated) = diags.check(
                client.deactivate_service(&service.id).await,
                "deactivate new",
                TYPE_NAME,
            ) {
                service = deactivated;
            }
        }

        encode(&ServiceModel::from(service), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        match diags.check(client.get_service(id).await, "read", TYPE_NAME)? {
            Some(service) => encode(&ServiceModel::from(service), diags).map(ResourceState::Present),
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
        let prior: ServiceModel = decode(prior, "state", diags)?;
        let plan: ServiceModel = decode(plan, "configuration", diags)?;

        let mut service = diags.check(
            client.update_service(id, &plan.update_request()).await,
            "update",
            TYPE_NAME,
        )?;

        let wants_active = plan.active.unwrap_or(true);
        if prior.active != Some(wants_active) || service.is_active() != wants_active {
            let result = if wants_active {
                client.activate_service(id).await
            } else {
                client.deactivate_service(id).await
            };
            service = diags.check(result, "change activation of", TYPE_NAME)?;
        }

        encode(&ServiceModel::from(service), diags)
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        match client.deactivate_service(id).await {
            Ok(_) => {
                diags.warning(
                    "Service deactivated",
                    format!(
                        "CacheFly services cannot be deleted; service '{}' was deactivated instead.",
                        id
                    ),
                );
                Some(())
            }
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

    fn service_body(status: &str) -> Value {
        json!({
            "_id": "s1",
            "name": "Docs",
            "uniqueName": "docs",
            "autoSsl": true,
            "status": status
        })
    }

    #[tokio::test]
    async fn test_create_applies_settings_after_create() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/services"))
            .and(body_json(json!({"name": "Docs", "uniqueName": "docs", "description": "d"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("ACTIVE")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/services/s1"))
            .and(body_json(json!({"autoSsl": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("ACTIVE")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = ServiceResource
            .create(
                &client,
                &json!({"name": "Docs", "unique_name": "docs", "description": "d", "auto_ssl": true}),
                &mut diags,
            )
            .await
            .unwrap();

        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(state["id"], "s1");
        assert_eq!(state["active"], true);
        assert_eq!(state["auto_ssl"], true);
    }

    #[tokio::test]
    async fn test_create_keeps_state_when_configure_fails() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("ACTIVE")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/services/s1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/services/s1/deactivate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("DEACTIVATED")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = ServiceResource
            .create(
                &client,
                &json!({"name": "Docs", "unique_name": "docs", "auto_ssl": true, "active": false}),
                &mut diags,
            )
            .await
            .unwrap();

        assert_eq!(state["id"], "s1");
        assert_eq!(diags.error_count(), 1);
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Unable to configure new cachefly_service"
        );
    }

    #[tokio::test]
    async fn test_read_removed_on_404() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/services/s1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let result = ServiceResource
            .read(&client, &json!({"id": "s1"}), &mut diags)
            .await;
        assert_eq!(result, Some(ResourceState::Removed));
    }

    #[tokio::test]
    async fn test_update_deactivates_when_requested() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("PUT"))
            .and(path("/services/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("ACTIVE")))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/services/s1/deactivate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("DEACTIVATED")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let state = ServiceResource
            .update(
                &client,
                &json!({"id": "s1", "name": "Docs", "unique_name": "docs", "active": true}),
                &json!({"name": "Docs", "unique_name": "docs", "active": false}),
                &mut diags,
            )
            .await
            .unwrap();

        assert_eq!(state["active"], false);
        assert_eq!(state["status"], "DEACTIVATED");
    }

    #[tokio::test]
    async fn test_delete_deactivates_with_warning() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("PUT"))
            .and(path("/services/s1/deactivate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(service_body("DEACTIVATED")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let result = ServiceResource
            .delete(&client, &json!({"id": "s1"}), &mut diags)
            .await;

        assert_eq!(result, Some(()));
        assert!(!diags.has_errors());
        assert_eq!(diags.iter().next().unwrap().summary, "Service deactivated");
    }

    #[tokio::test]
    async fn test_create_api_error_becomes_diagnostic() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/services"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "uniqueName already taken"})),
            )
            .mount(&mock_server)
            .await;

        let mut diags = Diagnostics::new();
        let result = ServiceResource
            .create(&client, &json!({"name": "Docs", "unique_name": "docs"}), &mut diags)
            .await;

        assert!(result.is_none());
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Unable to create cachefly_service");
        assert!(diag.detail.contains("uniqueName already taken"));
    }
}
