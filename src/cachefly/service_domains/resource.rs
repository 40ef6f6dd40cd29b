//! cachefly_service_domain resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id, require_str};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{ServiceDomain, ServiceDomainRequest};

const TYPE_NAME: &str = "cachefly_service_domain";

/// State of a service domain as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(super) struct ServiceDomainModel {
    pub id: Option<String>,
    pub service_id: String,
    pub name: String,
    pub description: Option<String>,
    pub validation_mode: Option<String>,
    pub signal_validation_ready: Option<bool>,
    pub validation_target: Option<String>,
    pub validation_status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ServiceDomainModel {
    pub(super) fn from_api(domain: ServiceDomain, service_id: &str) -> Self {
        Self {
            id: Some(domain.id),
            service_id: domain.service.unwrap_or_else(|| service_id.to_string()),
            name: domain.name,
            description: domain.description,
            validation_mode: domain.validation_mode,
            signal_validation_ready: None,
            validation_target: domain.validation_target,
            validation_status: domain.validation_status,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    fn request(&self) -> ServiceDomainRequest {
        ServiceDomainRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            validation_mode: self.validation_mode.clone(),
        }
    }

    fn refreshed(domain: ServiceDomain, known: &ServiceDomainModel) -> Self {
        Self {
            signal_validation_ready: known.signal_validation_ready,
            ..Self::from_api(domain, &known.service_id)
        }
    }
}

pub(super) fn domain_fields() -> Vec<(&'static str, AttributeType)> {
    vec![
        ("id", AttributeType::String),
        ("service_id", AttributeType::String),
        ("name", AttributeType::String),
        ("description", AttributeType::String),
        ("validation_mode", AttributeType::String),
        ("signal_validation_ready", AttributeType::Bool),
        ("validation_target", AttributeType::String),
        ("validation_status", AttributeType::String),
        ("created_at", AttributeType::String),
        ("updated_at", AttributeType::String),
    ]
}

/// Manages a domain attached to a CacheFly service
///
/// Imported with `<service_id>/<domain_id>`.
pub struct ServiceDomainResource;

#[async_trait]
impl Resource for ServiceDomainResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("A domain name served by a CacheFly service.")
            .attribute("id", Attribute::computed(AttributeType::String, "Domain ID."))
            .attribute(
                "service_id",
                Attribute::required(AttributeType::String, "ID of the owning service.")
                    .requires_replace(),
            )
            .attribute(
                "name",
                Attribute::required(AttributeType::String, "Fully qualified domain name."),
            )
            .attribute(
                "description",
                Attribute::optional(AttributeType::String, "Free-text description."),
            )
            .attribute(
                "validation_mode",
                Attribute::optional_computed(
                    AttributeType::String,
                    "Domain validation mode: HTTP, DNS or MANUAL.",
                ),
            )
            .attribute(
                "signal_validation_ready",
                Attribute::optional(
                    AttributeType::Bool,
                    "Signal CacheFly that the domain is ready for validation after create.",
                ),
            )
            .attribute(
                "validation_target",
                Attribute::computed(AttributeType::String, "Where the validation token must be published."),
            )
            .attribute(
                "validation_status",
                Attribute::computed(AttributeType::String, "Current validation status."),
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

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let plan: ServiceDomainModel = decode(plan, "configuration", diags)?;
        let mut domain = diags.check(
            client.create_service_domain(&plan.service_id, &plan.request()).await,
            "create",
            TYPE_NAME,
        )?;

        // The domain exists from here on; a failed signal still yields state.
        if plan.signal_validation_ready == Some(true) {
            if let Some(signalled) = diags.check(
                client
                    .signal_domain_validation_ready(&plan.service_id, &domain.id)
                    .await,
                "signal validation for",
                TYPE_NAME,
            ) {
                domain = signalled;
            }
        }

        encode(&ServiceDomainModel::refreshed(domain, &plan), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let service_id = require_str(state, "service_id", diags)?;
        let known: ServiceDomainModel = decode(state, "state", diags)?;

        match diags.check(client.get_service_domain(service_id, id).await, "read", TYPE_NAME)? {
            Some(domain) => encode(&ServiceDomainModel::refreshed(domain, &known), diags)
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
        let plan: ServiceDomainModel = decode(plan, "configuration", diags)?;
        let domain = diags.check(
            client
                .update_service_domain(&plan.service_id, id, &plan.request())
                .await,
            "update",
            TYPE_NAME,
        )?;
        encode(&ServiceDomainModel::refreshed(domain, &plan), diags)
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        let service_id = require_str(state, "service_id", diags)?;
        diags.check(
            client.delete_service_domain(service_id, id).await,
            "delete",
            TYPE_NAME,
        )?;
        Some(())
    }

    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        match id.split_once('/') {
            Some((service_id, domain_id)) if !service_id.is_empty() && !domain_id.is_empty() => {
                Some(json!({"id": domain_id, "service_id": service_id}))
            }
            _ => {
                diags.error(
                    "Invalid import ID",
                    format!(
                        "Expected \"<service_id>/<domain_id>\", got \"{}\".",
                        id
                    ),
                );
                None
            }
        }
    }
}
