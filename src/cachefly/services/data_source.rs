//! cachefly_service and cachefly_services data sources

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::{decode, encode};
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::resource::{service_attributes, ServiceModel};

/// Looks up a single service by ID or unique name
pub struct ServiceDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ServiceLookup {
    id: Option<String>,
    unique_name: Option<String>,
}

#[async_trait]
impl DataSource for ServiceDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_service"
    }

    fn schema(&self) -> Schema {
        service_attributes(Schema::new(
            "Look up a CacheFly service by ID or unique name. Exactly one of the two must be set.",
        ))
        .attribute(
            "id",
            Attribute::optional_computed(AttributeType::String, "Service ID."),
        )
        .attribute(
            "unique_name",
            Attribute::optional_computed(AttributeType::String, "Unique name of the service."),
        )
        .attribute("name", Attribute::computed(AttributeType::String, "Display name."))
        .attribute(
            "description",
            Attribute::computed(AttributeType::String, "Free-text description."),
        )
        .attribute("auto_ssl", Attribute::computed(AttributeType::Bool, "Automatic SSL."))
        .attribute(
            "configuration_mode",
            Attribute::computed(AttributeType::String, "Configuration mode."),
        )
        .attribute(
            "tls_profile",
            Attribute::computed(AttributeType::String, "TLS profile name."),
        )
        .attribute(
            "active",
            Attribute::computed(AttributeType::Bool, "Whether the service is active."),
        )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let lookup: ServiceLookup = decode(config, "configuration", diags)?;

        let (result, label) = match (lookup.id.as_deref(), lookup.unique_name.as_deref()) {
            (Some(id), None) => (client.get_service(id).await, format!("ID '{}'", id)),
            (None, Some(name)) => (
                client.get_service_by_unique_name(name).await,
                format!("unique name '{}'", name),
            ),
            _ => {
                diags.error(
                    "Invalid service lookup",
                    "Exactly one of \"id\" or \"unique_name\" must be set.",
                );
                return None;
            }
        };

        match diags.check(result, "read", self.type_name())? {
            Some(service) => encode(&ServiceModel::from(service), diags),
            None => {
                diags.error(
                    "Service not found",
                    format!("No CacheFly service with {} exists.", label),
                );
                None
            }
        }
    }
}

/// Lists services, optionally filtered by status
pub struct ServicesDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ServicesConfig {
    #[serde(flatten)]
    page: PageConfig,
    search: Option<String>,
    status: Option<String>,
    response_type: Option<String>,
}

#[async_trait]
impl DataSource for ServicesDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_services"
    }

    fn schema(&self) -> Schema {
        let service = AttributeType::object(&[
            ("id", AttributeType::String),
            ("name", AttributeType::String),
            ("unique_name", AttributeType::String),
            ("description", AttributeType::String),
            ("auto_ssl", AttributeType::Bool),
            ("configuration_mode", AttributeType::String),
            ("tls_profile", AttributeType::String),
            ("active", AttributeType::Bool),
            ("status", AttributeType::String),
            ("created_at", AttributeType::String),
            ("updated_at", AttributeType::String),
        ]);

        with_paging(Schema::new("List CacheFly services."))
            .attribute(
                "search",
                Attribute::optional(AttributeType::String, "Free-text search."),
            )
            .attribute(
                "status",
                Attribute::optional(AttributeType::String, "Only services with this status."),
            )
            .attribute(
                "response_type",
                Attribute::optional(
                    AttributeType::String,
                    "Response shape requested from the API (e.g. shallow).",
                ),
            )
            .attribute(
                "services",
                Attribute::computed(AttributeType::list_of(service), "Matching services."),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: ServicesConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters {
            search: parsed.search,
            status: parsed.status,
            response_type: parsed.response_type,
            ..ListFilters::default()
        });

        let collected = diags.check(client.get_services(&options).await, "read", self.type_name())?;
        let services: Vec<ServiceModel> = collected.items.into_iter().map(ServiceModel::from).collect();
        list_state(config, "services", &services, collected.total, diags)
    }
}
