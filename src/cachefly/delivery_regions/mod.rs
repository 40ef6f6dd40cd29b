//! Delivery regions module - read-only catalogue of CDN delivery regions

mod api;
mod data_source;
mod models;

pub use data_source::DeliveryRegionsDataSource;
pub use models::DeliveryRegion;
