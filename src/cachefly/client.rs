//! CacheFly HTTP client for API interactions

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::api;
use crate::error::{CacheFlyError, Result};
use crate::cachefly::pagination::{collect_pages, Collected, ListOptions, Page, PageRequest};
use crate::cachefly::traits::PaginatedResponse;

/// CacheFly API client
pub struct CacheFlyClient {
    client: Client,
    token: String,
    base_url: String,
}

impl CacheFlyClient {
    /// Create a new client with pooled connections and request timeouts
    pub fn new(token: String, base_url: String) -> Self {
        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(api::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(api::REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL for API requests, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from an API path (e.g. "/services")
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    /// Create a PUT request builder with standard headers
    pub(crate) fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.put(url))
    }

    /// Create a DELETE request builder with standard headers
    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.delete(url))
    }

    /// Parse an API response, returning error for non-success status codes
    ///
    /// `action` describes the request for error messages, e.g.
    /// "create origin 'assets'".
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(Self::api_error(response, action).await);
        }
        Ok(response.json().await?)
    }

    /// Turn a non-success response into an API error, keeping the server's message
    async fn api_error(response: reqwest::Response, action: &str) -> CacheFlyError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = match extract_error_detail(&body) {
            Some(detail) => format!("Failed to {}: {}", action, detail),
            None => format!("Failed to {}", action),
        };

        CacheFlyError::Api { status, message }
    }

    /// Fetch a single resource by API path
    ///
    /// Returns `None` for 404, an error for other non-success status codes.
    pub async fn fetch_resource_by_path<T>(&self, path: &str, resource_label: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("Fetching {} from: {}", resource_label, url);

        let response = self.get(&url).send().await?;

        if response.status().as_u16() == 404 {
            debug!("{} not found", resource_label);
            return Ok(None);
        }

        let item = self
            .parse_api_response(response, &format!("fetch {}", resource_label))
            .await?;
        Ok(Some(item))
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B, action: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {} ({})", url, action);

        let response = self.post(&url).json(body).send().await?;
        self.parse_api_response(response, action).await
    }

    /// PUT a JSON body and parse the JSON response
    pub async fn put_json<B, T>(&self, path: &str, body: &B, action: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("PUT {} ({})", url, action);

        let response = self.put(&url).json(body).send().await?;
        self.parse_api_response(response, action).await
    }

    /// PUT without a body (activation style endpoints) and parse the response
    pub async fn put_action<T>(&self, path: &str, action: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("PUT {} ({})", url, action);

        let response = self.put(&url).send().await?;
        self.parse_api_response(response, action).await
    }

    /// DELETE a resource by path
    ///
    /// Returns `false` when the resource was already gone (404).
    pub async fn delete_by_path(&self, path: &str, action: &str) -> Result<bool> {
        let url = self.url(path);
        debug!("DELETE {} ({})", url, action);

        let response = self.delete(&url).send().await?;

        match response.status().as_u16() {
            200..=299 => Ok(true),
            404 => {
                debug!("Nothing to delete at {}", url);
                Ok(false)
            }
            _ => Err(Self::api_error(response, action).await),
        }
    }

    /// Fetch one page of a list endpoint
    pub async fn fetch_page<T, R>(
        &self,
        path: &str,
        request: PageRequest<'_>,
        error_context: &str,
    ) -> Result<Page<T>>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        let url = self.page_url(path, &request);
        debug!("Fetching {} from: {}", error_context, url);

        let response = self.get(&url).send().await?;
        let resp: R = self
            .parse_api_response(response, &format!("fetch {}", error_context))
            .await?;

        let total = resp.total_count();
        let items = resp.into_data();
        debug!(
            "Offset {} returned {} of {} {}",
            request.offset,
            items.len(),
            total,
            error_context
        );

        Ok(Page { items, total })
    }

    /// Fetch every page of a list endpoint, sequentially by offset
    ///
    /// # Arguments
    /// * `path` - API path (e.g., "/origins" or "/services/abc/domains")
    /// * `options` - Offset, page size, filters and optional deadline
    /// * `error_context` - What is being listed (e.g., "origins")
    ///
    /// # Type Parameters
    /// * `T` - The item type (e.g., Origin)
    /// * `R` - The page response type that implements PaginatedResponse<T>
    pub async fn fetch_all_pages<T, R>(
        &self,
        path: &str,
        options: &ListOptions,
        error_context: &str,
    ) -> Result<Collected<T>>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        collect_pages(options, error_context, |request| {
            self.fetch_page::<T, R>(path, request, error_context)
        })
        .await
    }

    /// Build the URL for one page, appending offset, limit and filters
    fn page_url(&self, path: &str, request: &PageRequest<'_>) -> String {
        let separator = if path.contains('?') { "&" } else { "?" };
        let mut url = format!(
            "{}{}{}offset={}&limit={}",
            self.base_url, path, separator, request.offset, request.limit
        );
        for (key, value) in request.filters.query_pairs() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

/// Pull a human-readable message out of a CacheFly error body
///
/// Handles `{"message": ...}`, `{"error": ...}` and
/// `{"errors": [{"message"|"detail": ...}]}`; falls back to short plain text.
fn extract_error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(json) => {
            for key in ["message", "error"] {
                if let Some(msg) = json[key].as_str() {
                    return Some(msg.to_string());
                }
            }
            let first = &json["errors"][0];
            first["message"]
                .as_str()
                .or_else(|| first["detail"].as_str())
                .or_else(|| first.as_str())
                .map(str::to_string)
        }
        Err(_) if trimmed.len() <= 200 => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
impl CacheFlyClient {
    /// Create a test client pointed at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new("test-token".to_string(), base_url.to_string())
    }
}
