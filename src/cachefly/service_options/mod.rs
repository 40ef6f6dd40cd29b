//! Service options module - per-service CDN behaviour settings and their metadata

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::ServiceOptionsDataSource;
pub use models::OptionMetadata;
pub use resource::ServiceOptionsResource;
