//! Certificates module - uploaded TLS certificates

mod api;
mod models;
mod resource;

pub use models::{Certificate, CertificateCreateRequest};
pub use resource::CertificateResource;
