//! cachefly_service_options data source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cachefly::value::options_to_json;
use crate::cachefly::CacheFlyClient;
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

/// Reads the options of a service, optionally with their metadata
pub struct ServiceOptionsDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ServiceOptionsConfig {
    service_id: String,
    include_metadata: Option<bool>,
}

#[async_trait]
impl DataSource for ServiceOptionsDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_service_options"
    }

    fn schema(&self) -> Schema {
        let metadata = AttributeType::object(&[
            ("name", AttributeType::String),
            ("title", AttributeType::String),
            ("description", AttributeType::String),
            ("type", AttributeType::String),
            ("group", AttributeType::String),
            ("read_only", AttributeType::Bool),
        ]);

        Schema::new("Read the options of a CacheFly service.")
            .attribute(
                "service_id",
                Attribute::required(AttributeType::String, "ID of the service."),
            )
            .attribute(
                "include_metadata",
                Attribute::optional(AttributeType::Bool, "Also read option metadata."),
            )
            .attribute(
                "options",
                Attribute::computed(AttributeType::Dynamic, "Option names and values."),
            )
            .attribute(
                "metadata",
                Attribute::computed(
                    AttributeType::list_of(metadata),
                    "Metadata of every supported option, when requested.",
                ),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: ServiceOptionsConfig = decode(config, "configuration", diags)?;

        let Some(options) = diags.check(
            client.get_service_options(&parsed.service_id).await,
            "read",
            self.type_name(),
        )?
        else {
            diags.error(
                "Service not found",
                format!("No CacheFly service with ID '{}' exists.", parsed.service_id),
            );
            return None;
        };

        let metadata = if parsed.include_metadata == Some(true) {
            let metadata = diags.check(
                client.get_service_options_metadata(&parsed.service_id).await,
                "read",
                self.type_name(),
            )?;
            metadata
                .into_iter()
                .map(|m| {
                    json!({
                        "name": m.name,
                        "title": m.title,
                        "description": m.description,
                        "type": m.kind,
                        "group": m.group,
                        "read_only": m.read_only,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        Some(json!({
            "service_id": parsed.service_id,
            "include_metadata": parsed.include_metadata,
            "options": options_to_json(&options),
            "metadata": metadata,
        }))
    }
}
