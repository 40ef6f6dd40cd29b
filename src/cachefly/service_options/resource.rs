//! cachefly_service_options resource

use async_trait::async_trait;
use log::debug;
use serde_json::{json, Value};

use crate::cachefly::value::{options_from_json, options_to_json, OptionMap};
use crate::cachefly::CacheFlyClient;
use crate::provider::state::require_str;
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::check_options;

const TYPE_NAME: &str = "cachefly_service_options";

/// Read the `options` attribute as an option map
fn planned_options(plan: &Value, diags: &mut Diagnostics) -> Option<OptionMap> {
    match options_from_json(plan.get("options").unwrap_or(&Value::Null)) {
        Ok(options) => Some(options),
        Err(e) => {
            diags.attribute_error("options", "Invalid options", e.to_string());
            None
        }
    }
}

/// Keep only the managed keys of `remote`
///
/// `None` (fresh import, no `options` yet) keeps everything; an empty map
/// keeps nothing.
fn managed_subset(remote: &OptionMap, managed: Option<&OptionMap>) -> OptionMap {
    let Some(managed) = managed else {
        return remote.clone();
    };
    remote
        .iter()
        .filter(|(name, _)| managed.contains_key(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn options_state(service_id: &str, options: &OptionMap, remote: &OptionMap) -> Value {
    json!({
        "id": service_id,
        "service_id": service_id,
        "options": options_to_json(options),
        "effective_options": options_to_json(remote),
    })
}

/// Manages the option values of one service
///
/// Only the options named in configuration are managed; other options keep
/// whatever value they have. Imported with the service ID.
pub struct ServiceOptionsResource;

impl ServiceOptionsResource {
    /// Validate names against metadata, then write the options
    async fn apply(
        &self,
        client: &CacheFlyClient,
        service_id: &str,
        options: &OptionMap,
        action: &str,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let metadata = diags.check(
            client.get_service_options_metadata(service_id).await,
            action,
            TYPE_NAME,
        )?;

        let check = check_options(options, &metadata);
        for name in &check.unknown {
            diags.attribute_error(
                "options",
                "Unknown service option",
                format!("Service '{}' has no option named \"{}\".", service_id, name),
            );
        }
        for name in &check.read_only {
            diags.attribute_error(
                "options",
                "Read-only service option",
                format!("Option \"{}\" is read-only and cannot be set.", name),
            );
        }
        if !check.is_ok() {
            return None;
        }

        debug!("Writing {} options to service '{}'", options.len(), service_id);
        let remote = diags.check(
            client.update_service_options(service_id, options).await,
            action,
            TYPE_NAME,
        )?;
        Some(options_state(service_id, &managed_subset(&remote, Some(options)), &remote))
    }
}

#[async_trait]
impl Resource for ServiceOptionsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("Option values of a CacheFly service.")
            .attribute(
                "id",
                Attribute::computed(AttributeType::String, "Same as service_id."),
            )
            .attribute(
                "service_id",
                Attribute::required(AttributeType::String, "ID of the service.").requires_replace(),
            )
            .attribute(
                "options",
                Attribute::required(
                    AttributeType::Dynamic,
                    "Object of option names to values. Only these options are managed.",
                ),
            )
            .attribute(
                "effective_options",
                Attribute::computed(AttributeType::Dynamic, "Every option of the service as last read."),
            )
    }

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let service_id = require_str(plan, "service_id", diags)?;
        let options = planned_options(plan, diags)?;
        self.apply(client, service_id, &options, "create", diags).await
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let service_id = require_str(state, "service_id", diags)?;
        let managed = match state.get("options") {
            None | Some(Value::Null) => None,
            Some(_) => Some(planned_options(state, diags)?),
        };

        match diags.check(client.get_service_options(service_id).await, "read", TYPE_NAME)? {
            Some(remote) => Some(ResourceState::Present(options_state(
                service_id,
                &managed_subset(&remote, managed.as_ref()),
                &remote,
            ))),
            None => Some(ResourceState::Removed),
        }
    }

    async fn update(
        &self,
        client: &CacheFlyClient,
        _prior: &Value,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let service_id = require_str(plan, "service_id", diags)?;
        let options = planned_options(plan, diags)?;
        self.apply(client, service_id, &options, "update", diags).await
    }

    async fn delete(
        &self,
        _client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let service_id = require_str(state, "service_id", diags)?;
        diags.warning(
            "Service options left in place",
            format!(
                "Options of service '{}' are no longer managed but keep their current values.",
                service_id
            ),
        );
        Some(())
    }

    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        if id.trim().is_empty() {
            diags.error("Invalid import ID", "Expected a service ID.");
            return None;
        }
        Some(json!({"id": id, "service_id": id}))
    }
}
