//! cachefly_service_domains data source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::resource::{domain_fields, ServiceDomainModel};

/// Lists the domains of one service
pub struct ServiceDomainsDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ServiceDomainsConfig {
    #[serde(flatten)]
    page: PageConfig,
    service_id: String,
    search: Option<String>,
}

#[async_trait]
impl DataSource for ServiceDomainsDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_service_domains"
    }

    fn schema(&self) -> Schema {
        with_paging(Schema::new("List the domains of a CacheFly service."))
            .attribute(
                "service_id",
                Attribute::required(AttributeType::String, "ID of the service."),
            )
            .attribute(
                "search",
                Attribute::optional(AttributeType::String, "Free-text search on domain names."),
            )
            .attribute(
                "domains",
                Attribute::computed(
                    AttributeType::list_of(AttributeType::object(&domain_fields())),
                    "Matching domains.",
                ),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: ServiceDomainsConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters {
            search: parsed.search,
            ..ListFilters::default()
        });

        let collected = diags.check(
            client.get_service_domains(&parsed.service_id, &options).await,
            "read",
            self.type_name(),
        )?;
        let domains: Vec<ServiceDomainModel> = collected
            .items
            .into_iter()
            .map(|d| ServiceDomainModel::from_api(d, &parsed.service_id))
            .collect();
        list_state(config, "domains", &domains, collected.total, diags)
    }
}
