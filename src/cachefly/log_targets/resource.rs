//! cachefly_log_target resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{LogTarget, LogTargetRequest};

const TYPE_NAME: &str = "cachefly_log_target";

/// State of a log target as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(super) struct LogTargetModel {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: String,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub access_key: Option<String>,
    pub signature_version: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub index: Option<String>,
    pub user: Option<String>,
    pub access_logs_services: Option<Vec<String>>,
    pub origin_logs_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<LogTarget> for LogTargetModel {
    fn from(target: LogTarget) -> Self {
        Self {
            id: Some(target.id),
            kind: target.kind,
            name: target.name,
            endpoint: target.endpoint,
            region: target.region,
            bucket: target.bucket,
            access_key: target.access_key,
            signature_version: target.signature_version,
            hosts: Some(target.hosts),
            index: target.index,
            user: target.user,
            access_logs_services: Some(target.access_logs_services),
            origin_logs_services: Some(target.origin_logs_services),
            secret_key: None,
            json_key: None,
            password: None,
            api_key: None,
            created_at: target.created_at,
            updated_at: target.updated_at,
        }
    }
}

impl LogTargetModel {
    fn request(&self) -> LogTargetRequest {
        LogTargetRequest {
            kind: self.kind.clone(),
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            bucket: self.bucket.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            signature_version: self.signature_version.clone(),
            json_key: self.json_key.clone(),
            hosts: self.hosts.clone(),
            index: self.index.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            api_key: self.api_key.clone(),
            access_logs_services: self.access_logs_services.clone(),
            origin_logs_services: self.origin_logs_services.clone(),
        }
    }

    fn refreshed(target: LogTarget, known: &LogTargetModel) -> Self {
        Self {
            secret_key: known.secret_key.clone(),
            json_key: known.json_key.clone(),
            password: known.password.clone(),
            api_key: known.api_key.clone(),
            ..Self::from(target)
        }
    }
}

pub(super) fn log_target_fields() -> Vec<(&'static str, AttributeType)> {
    let strings = AttributeType::list_of(AttributeType::String);
    vec![
        ("id", AttributeType::String),
        ("type", AttributeType::String),
        ("name", AttributeType::String),
        ("endpoint", AttributeType::String),
        ("region", AttributeType::String),
        ("bucket", AttributeType::String),
        ("access_key", AttributeType::String),
        ("signature_version", AttributeType::String),
        ("hosts", strings.clone()),
        ("index", AttributeType::String),
        ("user", AttributeType::String),
        ("access_logs_services", strings.clone()),
        ("origin_logs_services", strings),
        ("created_at", AttributeType::String),
        ("updated_at", AttributeType::String),
    ]
}

/// Manages a log delivery target
pub struct LogTargetResource;

#[async_trait]
impl Resource for LogTargetResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let string = |desc| Attribute::optional_computed(AttributeType::String, desc);
        let secret = |desc| Attribute::optional(AttributeType::String, desc).sensitive();
        let strings = |desc| {
            Attribute::optional_computed(AttributeType::list_of(AttributeType::String), desc)
        };

        Schema::new("A destination that CacheFly delivers access or origin logs to.")
            .attribute("id", Attribute::computed(AttributeType::String, "Log target ID."))
            .attribute(
                "type",
                Attribute::required(
                    AttributeType::String,
                    "Target type: S3_BUCKET, GOOGLE_BUCKET or ELASTICSEARCH.",
                )
                .requires_replace(),
            )
            .attribute("name", Attribute::required(AttributeType::String, "Display name."))
            .attribute("endpoint", string("Bucket endpoint."))
            .attribute("region", string("Bucket region."))
            .attribute("bucket", string("Bucket name."))
            .attribute("access_key", string("Bucket access key."))
            .attribute("signature_version", string("S3 signature version."))
            .attribute("hosts", strings("Elasticsearch hosts."))
            .attribute("index", string("Elasticsearch index."))
            .attribute("user", string("Elasticsearch user."))
            .attribute("access_logs_services", strings("Services whose access logs are delivered."))
            .attribute("origin_logs_services", strings("Services whose origin logs are delivered."))
            .attribute("secret_key", secret("Bucket secret key. Write-only."))
            .attribute("json_key", secret("Google service account key (JSON). Write-only."))
            .attribute("password", secret("Elasticsearch password. Write-only."))
            .attribute("api_key", secret("Elasticsearch API key. Write-only."))
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
        let plan: LogTargetModel = decode(plan, "configuration", diags)?;
        let target = diags.check(client.create_log_target(&plan.request()).await, "create", TYPE_NAME)?;
        encode(&LogTargetModel::refreshed(target, &plan), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let known: LogTargetModel = decode(state, "state", diags)?;
        match diags.check(client.get_log_target(id).await, "read", TYPE_NAME)? {
            Some(target) => encode(&LogTargetModel::refreshed(target, &known), diags)
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
        let plan: LogTargetModel = decode(plan, "configuration", diags)?;
        let target = diags.check(
            client.update_log_target(id, &plan.request()).await,
            "update",
            TYPE_NAME,
        )?;
        encode(&LogTargetModel::refreshed(target, &plan), diags)
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        diags.check(client.delete_log_target(id).await, "delete", TYPE_NAME)?;
        Some(())
    }
}
