//! API token and base URL resolution from multiple sources

use log::debug;

use crate::config::{api, credentials};
use crate::error::{CacheFlyError, Result};

/// Token resolution with fallback logic
pub struct TokenResolver;

impl TokenResolver {
    /// Resolve token from multiple sources with fallback:
    /// 1. Provider configuration (`api_token`)
    /// 2. Environment variable (CACHEFLY_API_TOKEN)
    pub fn resolve(configured: Option<&str>) -> Result<String> {
        Self::resolve_with(configured, std::env::var(credentials::TOKEN_ENV_VAR).ok())
    }

    fn resolve_with(configured: Option<&str>, from_env: Option<String>) -> Result<String> {
        if let Some(token) = configured.filter(|t| !t.trim().is_empty()) {
            debug!("Using API token from provider configuration");
            return Ok(token.to_string());
        }

        if let Some(token) = from_env.filter(|t| !t.trim().is_empty()) {
            debug!(
                "Using API token from {} environment variable",
                credentials::TOKEN_ENV_VAR
            );
            return Ok(token);
        }

        Err(CacheFlyError::TokenNotFound(Self::token_not_found_message()))
    }

    /// Generate helpful error message when token is not found
    fn token_not_found_message() -> String {
        format!(
            "No CacheFly API token found. Please provide a token using one of:\n\
             \n\
             1. Provider config:   api_token = \"<TOKEN>\"  (CLI: --token <TOKEN>)\n\
             2. Environment var:   export {}=<TOKEN>",
            credentials::TOKEN_ENV_VAR
        )
    }
}

/// Base URL resolution with fallback logic
pub struct BaseUrlResolver;

impl BaseUrlResolver {
    /// Resolve base URL from multiple sources with fallback:
    /// 1. Provider configuration (`base_url`)
    /// 2. Environment variable (CACHEFLY_BASE_URL)
    /// 3. Default CacheFly API endpoint
    pub fn resolve(configured: Option<&str>) -> Result<String> {
        Self::resolve_with(
            configured,
            std::env::var(credentials::BASE_URL_ENV_VAR).ok(),
        )
    }

    fn resolve_with(configured: Option<&str>, from_env: Option<String>) -> Result<String> {
        let url = match (configured, from_env) {
            (Some(url), _) if !url.trim().is_empty() => {
                debug!("Using base URL from provider configuration: {}", url);
                url.trim().to_string()
            }
            (_, Some(url)) if !url.trim().is_empty() => {
                debug!(
                    "Using base URL from {} environment variable: {}",
                    credentials::BASE_URL_ENV_VAR,
                    url
                );
                url.trim().to_string()
            }
            _ => api::DEFAULT_BASE_URL.to_string(),
        };

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CacheFlyError::Config(format!(
                "base_url must start with http:// or https:// (got '{}')",
                url
            )));
        }

        Ok(url.trim_end_matches('/').to_string())
    }
}
