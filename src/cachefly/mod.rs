//! CacheFly API client module
//!
//! Typed access to the CacheFly REST API (v2.5): one submodule per resource
//! with its models and API calls, plus the provider resource and data source
//! built on top of them.

mod client;
mod credentials;
pub mod certificates;
pub mod delivery_regions;
pub mod log_targets;
pub mod origins;
pub mod pagination;
pub mod script_configs;
pub mod service_domains;
pub mod service_options;
pub mod services;
pub mod traits;
pub mod users;
pub mod value;

use serde::Deserialize;

pub use client::CacheFlyClient;
pub use credentials::{BaseUrlResolver, TokenResolver};
pub use pagination::{collect_pages, Collected, ListFilters, ListOptions, Page, PageRequest};
pub use traits::{ApiListResponse, PaginatedResponse};
pub use value::{OptionMap, OptionValue};

/// List metadata returned by CacheFly list endpoints
///
/// Only the total is read; the echoed `limit` and `offset` are ignored.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ListMeta {
    /// Total number of matching records
    pub count: Option<u32>,
}
