//! Origins module - upstream servers and buckets that services pull content from

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::OriginsDataSource;
pub use models::{Origin, OriginRequest};
pub use resource::OriginResource;
