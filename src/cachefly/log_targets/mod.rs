//! Log targets module - destinations for access and origin logs

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::LogTargetsDataSource;
pub use models::{LogTarget, LogTargetRequest};
pub use resource::LogTargetResource;
