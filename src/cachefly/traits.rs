//! Pagination traits for CacheFly list responses

use serde::Deserialize;

use crate::cachefly::ListMeta;

/// Trait for API responses that contain one page of list data
///
/// Implement this trait for a response type to use it with
/// `CacheFlyClient::fetch_all_pages()`.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Total count reported by the server (0 when unknown)
    fn total_count(&self) -> u32;
}

/// Generic list response wrapper: `{"meta": {...}, "data": [...]}`
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn total_count(&self) -> u32 {
        self.meta.as_ref().and_then(|m| m.count).unwrap_or(0)
    }
}
