//! cachefly_delivery_regions data source

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::models::DeliveryRegion;

#[derive(Serialize, Debug)]
struct DeliveryRegionModel {
    id: String,
    name: String,
    description: Option<String>,
}

impl From<DeliveryRegion> for DeliveryRegionModel {
    fn from(region: DeliveryRegion) -> Self {
        Self {
            id: region.id,
            name: region.name,
            description: region.description,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct DeliveryRegionsConfig {
    #[serde(flatten)]
    page: PageConfig,
}

/// Lists the delivery regions available to the account
pub struct DeliveryRegionsDataSource;

#[async_trait]
impl DataSource for DeliveryRegionsDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_delivery_regions"
    }

    fn schema(&self) -> Schema {
        let region = AttributeType::object(&[
            ("id", AttributeType::String),
            ("name", AttributeType::String),
            ("description", AttributeType::String),
        ]);
        with_paging(Schema::new("List CacheFly delivery regions.")).attribute(
            "delivery_regions",
            Attribute::computed(AttributeType::list_of(region), "Delivery regions."),
        )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: DeliveryRegionsConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters::default());

        let collected = diags.check(
            client.get_delivery_regions(&options).await,
            "read",
            self.type_name(),
        )?;
        let regions: Vec<DeliveryRegionModel> = collected
            .items
            .into_iter()
            .map(DeliveryRegionModel::from)
            .collect();
        list_state(config, "delivery_regions", &regions, collected.total, diags)
    }
}
