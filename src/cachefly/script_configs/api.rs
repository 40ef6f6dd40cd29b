//! Script config API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::{ScriptConfig, ScriptConfigRequest};

impl CacheFlyClient {
    /// Get all script configs (with pagination)
    pub async fn get_script_configs(&self, options: &ListOptions) -> Result<Collected<ScriptConfig>> {
        let path = format!("/{}", api::SCRIPT_CONFIGS);
        self.fetch_all_pages::<ScriptConfig, ApiListResponse<ScriptConfig>>(
            &path,
            options,
            "script configs",
        )
        .await
    }

    pub async fn get_script_config(&self, config_id: &str) -> Result<Option<ScriptConfig>> {
        let path = format!("/{}/{}", api::SCRIPT_CONFIGS, config_id);
        self.fetch_resource_by_path::<ScriptConfig>(&path, &format!("script config '{}'", config_id))
            .await
    }

    pub async fn create_script_config(&self, request: &ScriptConfigRequest) -> Result<ScriptConfig> {
        let path = format!("/{}", api::SCRIPT_CONFIGS);
        self.post_json(&path, request, &format!("create script config '{}'", request.name))
            .await
    }

    pub async fn update_script_config(
        &self,
        config_id: &str,
        request: &ScriptConfigRequest,
    ) -> Result<ScriptConfig> {
        let path = format!("/{}/{}", api::SCRIPT_CONFIGS, config_id);
        self.put_json(&path, request, &format!("update script config '{}'", config_id))
            .await
    }

    pub async fn activate_script_config(&self, config_id: &str) -> Result<ScriptConfig> {
        let path = format!("/{}/{}/activate", api::SCRIPT_CONFIGS, config_id);
        self.put_action(&path, &format!("activate script config '{}'", config_id))
            .await
    }

    pub async fn deactivate_script_config(&self, config_id: &str) -> Result<ScriptConfig> {
        let path = format!("/{}/{}/deactivate", api::SCRIPT_CONFIGS, config_id);
        self.put_action(&path, &format!("deactivate script config '{}'", config_id))
            .await
    }
}
