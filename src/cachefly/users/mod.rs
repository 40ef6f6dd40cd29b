//! Users module - account users and their permissions

mod api;
mod data_source;
mod models;
mod resource;

pub use data_source::UsersDataSource;
pub use models::{User, UserRequest};
pub use resource::UserResource;
