//! Terraform-style provider layer
//!
//! [`CacheFlyProvider`] owns the registries of resources and data sources,
//! resolves credentials in [`CacheFlyProvider::configure`] and dispatches
//! lifecycle calls by type name. Configuration is validated against each
//! type's [`Schema`] before any API call is made, and every failure is
//! reported as a [`Diagnostic`] rather than an `Err`.

pub mod diagnostics;
pub mod list;
pub mod schema;
pub mod state;
pub mod traits;

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{
    certificates, delivery_regions, log_targets, origins, script_configs, service_domains,
    service_options, services, users, BaseUrlResolver, CacheFlyClient, TokenResolver,
};

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use schema::{Attribute, AttributeMode, AttributeType, Schema};
pub use state::ResourceState;
pub use traits::{DataSource, Resource};

/// Provider configuration block
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ProviderConfig {
    api_token: Option<String>,
    base_url: Option<String>,
}

/// The CacheFly provider
pub struct CacheFlyProvider {
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Box<dyn DataSource>>,
    client: Option<Arc<CacheFlyClient>>,
}

impl Default for CacheFlyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheFlyProvider {
    /// Create an unconfigured provider with every resource and data source registered
    pub fn new() -> Self {
        let resources: Vec<Box<dyn Resource>> = vec![
            Box::new(services::ServiceResource),
            Box::new(service_domains::ServiceDomainResource),
            Box::new(origins::OriginResource),
            Box::new(certificates::CertificateResource),
            Box::new(users::UserResource),
            Box::new(log_targets::LogTargetResource),
            Box::new(script_configs::ScriptConfigResource),
            Box::new(service_options::ServiceOptionsResource),
        ];

        let data_sources: Vec<Box<dyn DataSource>> = vec![
            Box::new(services::ServiceDataSource),
            Box::new(services::ServicesDataSource),
            Box::new(origins::OriginsDataSource),
            Box::new(service_domains::ServiceDomainsDataSource),
            Box::new(users::UsersDataSource),
            Box::new(log_targets::LogTargetsDataSource),
            Box::new(delivery_regions::DeliveryRegionsDataSource),
            Box::new(service_options::ServiceOptionsDataSource),
        ];

        Self {
            resources: resources.into_iter().map(|r| (r.type_name(), r)).collect(),
            data_sources: data_sources.into_iter().map(|d| (d.type_name(), d)).collect(),
            client: None,
        }
    }

    /// Create a provider that is already configured with `client`
    pub fn with_client(client: CacheFlyClient) -> Self {
        let mut provider = Self::new();
        provider.client = Some(Arc::new(client));
        provider
    }

    /// Schema of the provider configuration block
    pub fn schema() -> Schema {
        Schema::new("The CacheFly provider manages CacheFly CDN services, origins and related objects.")
            .attribute(
                "api_token",
                Attribute::optional(
                    AttributeType::String,
                    "CacheFly API token. Falls back to the CACHEFLY_API_TOKEN environment variable.",
                )
                .sensitive(),
            )
            .attribute(
                "base_url",
                Attribute::optional(
                    AttributeType::String,
                    "CacheFly API base URL. Falls back to CACHEFLY_BASE_URL, then https://api.cachefly.com/api/2.5.",
                ),
            )
    }

    /// Resolve credentials and create the API client
    ///
    /// Returns `false` (with diagnostics) when the configuration is invalid
    /// or no token can be found.
    pub fn configure(&mut self, config: &Value, diags: &mut Diagnostics) -> bool {
        Self::schema().validate_config(config, diags);
        if diags.has_errors() {
            return false;
        }

        let Some(config) = state::decode::<ProviderConfig>(config, "provider configuration", diags)
        else {
            return false;
        };

        let token = match TokenResolver::resolve(config.api_token.as_deref()) {
            Ok(token) => token,
            Err(e) => {
                diags.attribute_error("api_token", "Missing API token", e.to_string());
                return false;
            }
        };

        let base_url = match BaseUrlResolver::resolve(config.base_url.as_deref()) {
            Ok(url) => url,
            Err(e) => {
                diags.attribute_error("base_url", "Invalid base URL", e.to_string());
                return false;
            }
        };

        info!("Configured CacheFly provider for {}", base_url);
        self.client = Some(Arc::new(CacheFlyClient::new(token, base_url)));
        true
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    pub fn resource_schema(&self, type_name: &str, diags: &mut Diagnostics) -> Option<Schema> {
        self.resource(type_name, diags).map(|r| r.schema())
    }

    pub fn data_source_schema(&self, type_name: &str, diags: &mut Diagnostics) -> Option<Schema> {
        self.data_source(type_name, diags).map(|d| d.schema())
    }

    /// Read a data source
    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let data_source = self.data_source(type_name, diags)?;
        data_source.schema().validate_config(config, diags);
        let client = self.configured_client(diags)?;
        if diags.has_errors() {
            return None;
        }

        debug!("Reading data source {}", type_name);
        data_source.read(client, config, diags).await
    }

    /// Create a resource from a planned configuration
    pub async fn create_resource(
        &self,
        type_name: &str,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let resource = self.resource(type_name, diags)?;
        resource.schema().validate_config(plan, diags);
        let client = self.configured_client(diags)?;
        if diags.has_errors() {
            return None;
        }

        info!("Creating {}", type_name);
        resource.create(client, plan, diags).await
    }

    /// Refresh a resource's state
    pub async fn read_resource(
        &self,
        type_name: &str,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let resource = self.resource(type_name, diags)?;
        let client = self.configured_client(diags)?;

        debug!("Reading resource {}", type_name);
        resource.read(client, state, diags).await
    }

    /// Update a resource in place
    ///
    /// Changing an attribute that requires replacement is rejected; the
    /// object has to be deleted and created again.
    pub async fn update_resource(
        &self,
        type_name: &str,
        prior: &Value,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let resource = self.resource(type_name, diags)?;
        let schema = resource.schema();
        schema.validate_config(plan, diags);

        for name in schema.replacement_changes(prior, plan) {
            diags.attribute_error(
                name.as_str(),
                "Resource replacement required",
                format!(
                    "Changing \"{}\" cannot be done in place; delete and re-create the {}.",
                    name, type_name
                ),
            );
        }

        let client = self.configured_client(diags)?;
        if diags.has_errors() {
            return None;
        }

        info!("Updating {}", type_name);
        resource.update(client, prior, plan, diags).await
    }

    /// Delete a resource
    pub async fn delete_resource(
        &self,
        type_name: &str,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let resource = self.resource(type_name, diags)?;
        let client = self.configured_client(diags)?;

        info!("Deleting {}", type_name);
        resource.delete(client, state, diags).await
    }

    /// Import an existing object by ID and return its refreshed state
    pub async fn import_resource(
        &self,
        type_name: &str,
        id: &str,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let resource = self.resource(type_name, diags)?;
        let client = self.configured_client(diags)?;
        let initial = resource.import_state(id, diags)?;

        info!("Importing {} '{}'", type_name, id);
        match resource.read(client, &initial, diags).await? {
            ResourceState::Present(state) => Some(state),
            ResourceState::Removed => {
                diags.error(
                    "Cannot import non-existent remote object",
                    format!("No {} with ID '{}' exists.", type_name, id),
                );
                None
            }
        }
    }

    fn resource(&self, type_name: &str, diags: &mut Diagnostics) -> Option<&dyn Resource> {
        match self.resources.get(type_name) {
            Some(resource) => Some(resource.as_ref()),
            None => {
                diags.error(
                    "Unknown resource type",
                    format!(
                        "The provider does not support resource type \"{}\". Supported: {}",
                        type_name,
                        self.resource_types().join(", ")
                    ),
                );
                None
            }
        }
    }

    fn data_source(&self, type_name: &str, diags: &mut Diagnostics) -> Option<&dyn DataSource> {
        match self.data_sources.get(type_name) {
            Some(data_source) => Some(data_source.as_ref()),
            None => {
                diags.error(
                    "Unknown data source type",
                    format!(
                        "The provider does not support data source \"{}\". Supported: {}",
                        type_name,
                        self.data_source_types().join(", ")
                    ),
                );
                None
            }
        }
    }

    fn configured_client(&self, diags: &mut Diagnostics) -> Option<&CacheFlyClient> {
        match &self.client {
            Some(client) => Some(client.as_ref()),
            None => {
                diags.error(
                    "Provider not configured",
                    "The CacheFly provider must be configured before resources or data sources can be used.",
                );
                None
            }
        }
    }
}
