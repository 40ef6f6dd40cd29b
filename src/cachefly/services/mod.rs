//! Services module - CDN services, their activation state and lookup by unique name

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::{ServiceDataSource, ServicesDataSource};
pub use models::{Service, ServiceCreateRequest, ServiceUpdateRequest};
pub use resource::ServiceResource;
