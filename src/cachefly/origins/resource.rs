//! cachefly_origin resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{Origin, OriginRequest};

const TYPE_NAME: &str = "cachefly_origin";

/// State of an origin as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(super) struct OriginModel {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub scheme: Option<String>,
    pub cache_by_query_param: Option<bool>,
    pub gzip: Option<bool>,
    pub ttl: Option<i64>,
    pub missed_ttl: Option<i64>,
    pub connection_timeout: Option<i64>,
    pub time_to_first_byte: Option<i64>,
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    pub region: Option<String>,
    pub signature_version: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Origin> for OriginModel {
    fn from(origin: Origin) -> Self {
        Self {
            id: Some(origin.id),
            kind: origin.kind,
            name: origin.name,
            hostname: origin.hostname,
            scheme: origin.scheme,
            cache_by_query_param: origin.cache_by_query_param,
            gzip: origin.gzip,
            ttl: origin.ttl,
            missed_ttl: origin.missed_ttl,
            connection_timeout: origin.connection_timeout,
            time_to_first_byte: origin.time_to_first_byte,
            access_key: origin.access_key,
            secret_key: None,
            region: origin.region,
            signature_version: origin.signature_version,
            created_at: origin.created_at,
            updated_at: origin.updated_at,
        }
    }
}

impl OriginModel {
    fn request(&self) -> OriginRequest {
        OriginRequest {
            kind: self.kind.clone(),
            name: self.name.clone(),
            hostname: self.hostname.clone(),
            scheme: self.scheme.clone(),
            cache_by_query_param: self.cache_by_query_param,
            gzip: self.gzip,
            ttl: self.ttl,
            missed_ttl: self.missed_ttl,
            connection_timeout: self.connection_timeout,
            time_to_first_byte: self.time_to_first_byte,
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            region: self.region.clone(),
            signature_version: self.signature_version.clone(),
        }
    }

    /// Refreshed model that keeps the write-only secret from `known`
    fn refreshed(origin: Origin, known: &OriginModel) -> Self {
        Self {
            secret_key: known.secret_key.clone(),
            ..Self::from(origin)
        }
    }
}

/// Attributes shared by the resource and the list data source
pub(super) fn origin_fields() -> Vec<(&'static str, AttributeType)> {
    vec![
        ("id", AttributeType::String),
        ("type", AttributeType::String),
        ("name", AttributeType::String),
        ("hostname", AttributeType::String),
        ("scheme", AttributeType::String),
        ("cache_by_query_param", AttributeType::Bool),
        ("gzip", AttributeType::Bool),
        ("ttl", AttributeType::Int),
        ("missed_ttl", AttributeType::Int),
        ("connection_timeout", AttributeType::Int),
        ("time_to_first_byte", AttributeType::Int),
        ("access_key", AttributeType::String),
        ("region", AttributeType::String),
        ("signature_version", AttributeType::String),
        ("created_at", AttributeType::String),
        ("updated_at", AttributeType::String),
    ]
}

/// Manages a CacheFly origin
pub struct OriginResource;

#[async_trait]
impl Resource for OriginResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let int = |desc| Attribute::optional_computed(AttributeType::Int, desc);
        let string = |desc| Attribute::optional_computed(AttributeType::String, desc);

        Schema::new("An origin server or bucket that CacheFly fetches content from.")
            .attribute("id", Attribute::computed(AttributeType::String, "Origin ID."))
            .attribute(
                "type",
                Attribute::required(AttributeType::String, "Origin type: WEB or S3_BUCKET.")
                    .requires_replace(),
            )
            .attribute(
                "hostname",
                Attribute::required(AttributeType::String, "Hostname of the origin."),
            )
            .attribute("name", string("Display name."))
            .attribute("scheme", string("Protocol used to reach the origin: HTTP, HTTPS or FOLLOW."))
            .attribute(
                "cache_by_query_param",
                Attribute::optional_computed(AttributeType::Bool, "Include the query string in the cache key."),
            )
            .attribute(
                "gzip",
                Attribute::optional_computed(AttributeType::Bool, "Request gzip-compressed content from the origin."),
            )
            .attribute("ttl", int("Cache TTL in seconds."))
            .attribute("missed_ttl", int("TTL in seconds for error responses."))
            .attribute("connection_timeout", int("Connection timeout in seconds."))
            .attribute("time_to_first_byte", int("Time to first byte timeout in seconds."))
            .attribute("access_key", string("S3 access key."))
            .attribute(
                "secret_key",
                Attribute::optional(AttributeType::String, "S3 secret key. Write-only.").sensitive(),
            )
            .attribute("region", string("S3 region."))
            .attribute("signature_version", string("S3 signature version."))
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
        let plan: OriginModel = decode(plan, "configuration", diags)?;
        let origin = diags.check(client.create_origin(&plan.request()).await, "create", TYPE_NAME)?;
        encode(&OriginModel::refreshed(origin, &plan), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let known: OriginModel = decode(state, "state", diags)?;
        match diags.check(client.get_origin(id).await, "read", TYPE_NAME)? {
            Some(origin) => {
                encode(&OriginModel::refreshed(origin, &known), diags).map(ResourceState::Present)
            }
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
        let plan: OriginModel = decode(plan, "configuration", diags)?;
        let origin = diags.check(
            client.update_origin(id, &plan.request()).await,
            "update",
            TYPE_NAME,
        )?;
        encode(&OriginModel::refreshed(origin, &plan), diags)
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        diags.check(client.delete_origin(id).await, "delete", TYPE_NAME)?;
        Some(())
    }
}
