//! Service domains module - hostnames attached to a service and their validation

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::ServiceDomainsDataSource;
pub use models::{ServiceDomain, ServiceDomainRequest};
pub use resource::ServiceDomainResource;
