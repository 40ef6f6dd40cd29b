//! Resource and data source traits

use async_trait::async_trait;
use serde_json::{json, Value};

use super::diagnostics::Diagnostics;
use super::schema::Schema;
use super::state::ResourceState;
use crate::cachefly::CacheFlyClient;

/// A managed CacheFly object with a create/read/update/delete lifecycle
///
/// Every operation receives the configured client and a diagnostics sink.
/// Returning `None` means the operation failed and at least one error was
/// added to `diags`; no state is produced in that case.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name (e.g. "cachefly_origin"); the registry key
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the object from `plan` and return its full state
    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value>;

    /// Refresh `state` from the API
    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState>;

    /// Apply `plan` to the object described by `prior` and return the new state
    async fn update(
        &self,
        client: &CacheFlyClient,
        prior: &Value,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value>;

    /// Remove the object described by `state`
    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()>;

    /// Turn an import ID into a minimal state that `read` can refresh
    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        if id.trim().is_empty() {
            diags.error("Invalid import ID", "The import ID must not be empty.");
            return None;
        }
        Some(json!({ "id": id }))
    }
}

/// A read-only lookup against the CacheFly API
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name (e.g. "cachefly_origins"); the registry key
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Read the data source and return its state
    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value>;
}
