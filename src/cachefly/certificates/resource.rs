//! cachefly_certificate resource

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{Certificate, CertificateCreateRequest};

const TYPE_NAME: &str = "cachefly_certificate";

/// State of a certificate as seen by the provider
///
/// `certificate`, `certificate_key` and `password` are kept from the
/// configuration since the API never returns them.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
struct CertificateModel {
    id: Option<String>,
    certificate: String,
    certificate_key: String,
    password: Option<String>,
    subject_common_name: Option<String>,
    subject_names: Vec<String>,
    expired: Option<bool>,
    expiring: Option<bool>,
    in_use: Option<bool>,
    managed: Option<bool>,
    not_before: Option<String>,
    not_after: Option<String>,
    days_until_expiry: Option<i64>,
    created_at: Option<String>,
}

impl CertificateModel {
    fn refreshed(cert: Certificate, known: &CertificateModel) -> Self {
        Self {
            days_until_expiry: cert.days_until_expiry(Utc::now()),
            id: Some(cert.id),
            certificate: known.certificate.clone(),
            certificate_key: known.certificate_key.clone(),
            password: known.password.clone(),
            subject_common_name: Some(cert.subject_common_name),
            subject_names: cert.subject_names,
            expired: cert.expired,
            expiring: cert.expiring,
            in_use: cert.in_use,
            managed: cert.managed,
            not_before: cert.not_before,
            not_after: cert.not_after,
            created_at: cert.created_at,
        }
    }
}

/// Manages an uploaded TLS certificate
///
/// Certificates are immutable; any change to the PEM inputs replaces them.
pub struct CertificateResource;

#[async_trait]
impl Resource for CertificateResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let computed = |kind, desc| Attribute::computed(kind, desc);

        Schema::new("A TLS certificate uploaded to CacheFly.")
            .attribute("id", Attribute::computed(AttributeType::String, "Certificate ID."))
            .attribute(
                "certificate",
                Attribute::required(AttributeType::String, "PEM-encoded certificate chain.")
                    .requires_replace(),
            )
            .attribute(
                "certificate_key",
                Attribute::required(AttributeType::String, "PEM-encoded private key.")
                    .sensitive()
                    .requires_replace(),
            )
            .attribute(
                "password",
                Attribute::optional(AttributeType::String, "Passphrase of the private key.")
                    .sensitive()
                    .requires_replace(),
            )
            .attribute(
                "subject_common_name",
                computed(AttributeType::String, "Subject common name."),
            )
            .attribute(
                "subject_names",
                computed(
                    AttributeType::list_of(AttributeType::String),
                    "Subject alternative names.",
                ),
            )
            .attribute("expired", computed(AttributeType::Bool, "Whether the certificate has expired."))
            .attribute("expiring", computed(AttributeType::Bool, "Whether the certificate expires soon."))
            .attribute("in_use", computed(AttributeType::Bool, "Whether a service uses the certificate."))
            .attribute("managed", computed(AttributeType::Bool, "Whether CacheFly manages the certificate."))
            .attribute("not_before", computed(AttributeType::String, "Start of validity."))
            .attribute("not_after", computed(AttributeType::String, "End of validity."))
            .attribute(
                "days_until_expiry",
                computed(AttributeType::Int, "Whole days until expiry at the last refresh."),
            )
            .attribute("created_at", computed(AttributeType::String, "Upload timestamp."))
    }

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let plan: CertificateModel = decode(plan, "configuration", diags)?;
        let request = CertificateCreateRequest {
            certificate: plan.certificate.clone(),
            certificate_key: plan.certificate_key.clone(),
            password: plan.password.clone(),
        };
        let cert = diags.check(client.create_certificate(&request).await, "create", TYPE_NAME)?;
        encode(&CertificateModel::refreshed(cert, &plan), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let known: CertificateModel = decode(state, "state", diags)?;
        match diags.check(client.get_certificate(id).await, "read", TYPE_NAME)? {
            Some(cert) => {
                encode(&CertificateModel::refreshed(cert, &known), diags).map(ResourceState::Present)
            }
            None => Some(ResourceState::Removed),
        }
    }

    /// Every configurable attribute forces replacement, so an in-place
    /// update only refreshes computed attributes.
    async fn update(
        &self,
        client: &CacheFlyClient,
        prior: &Value,
        _plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        match self.read(client, prior, diags).await? {
            ResourceState::Present(state) => Some(state),
            ResourceState::Removed => {
                diags.error(
                    "Certificate no longer exists",
                    "The certificate was removed outside of the provider.",
                );
                None
            }
        }
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        diags.check(client.delete_certificate(id).await, "delete", TYPE_NAME)?;
        Some(())
    }
}
