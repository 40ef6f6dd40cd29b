//! Service options API operations

use serde_json::Value;

use crate::cachefly::traits::{ApiListResponse, PaginatedResponse};
use crate::cachefly::value::{options_from_json, options_to_json, OptionMap};
use crate::cachefly::CacheFlyClient;
use crate::config::api;
use crate::error::Result;

use super::models::OptionMetadata;

fn options_path(service_id: &str) -> String {
    format!("/{}/{}/{}", api::SERVICES, service_id, api::OPTIONS)
}

impl CacheFlyClient {
    /// Get the options of a service; `None` if the service does not exist
    pub async fn get_service_options(&self, service_id: &str) -> Result<Option<OptionMap>> {
        let raw = self
            .fetch_resource_by_path::<Value>(
                &options_path(service_id),
                &format!("options of service '{}'", service_id),
            )
            .await?;
        raw.as_ref().map(options_from_json).transpose()
    }

    /// Replace option values of a service and return the resulting options
    pub async fn update_service_options(
        &self,
        service_id: &str,
        options: &OptionMap,
    ) -> Result<OptionMap> {
        let raw: Value = self
            .put_json(
                &options_path(service_id),
                &options_to_json(options),
                &format!("update options of service '{}'", service_id),
            )
            .await?;
        options_from_json(&raw)
    }

    /// Get the metadata of every option the service supports
    pub async fn get_service_options_metadata(&self, service_id: &str) -> Result<Vec<OptionMetadata>> {
        let path = format!("{}/metadata", options_path(service_id));
        let response = self
            .fetch_resource_by_path::<ApiListResponse<OptionMetadata>>(
                &path,
                &format!("option metadata of service '{}'", service_id),
            )
            .await?;
        Ok(response.map(|r| r.into_data()).unwrap_or_default())
    }
}
