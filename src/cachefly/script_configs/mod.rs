//! Script configs module - edge script configuration documents bound to services

mod api;
mod models;
mod resource;

pub use models::{ScriptConfig, ScriptConfigRequest};
pub use resource::ScriptConfigResource;
