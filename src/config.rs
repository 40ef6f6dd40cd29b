/// Configuration constants for the CacheFly API
pub mod api {
    /// Default API base URL (v2.5)
    pub const DEFAULT_BASE_URL: &str = "https://api.cachefly.com/api/2.5";

    pub const SERVICES: &str = "services";
    pub const DOMAINS: &str = "domains";
    pub const ORIGINS: &str = "origins";
    pub const CERTIFICATES: &str = "certificates";
    pub const USERS: &str = "users";
    pub const LOG_TARGETS: &str = "logtargets";
    pub const SCRIPT_CONFIGS: &str = "scriptConfigs";
    pub const OPTIONS: &str = "options";
    pub const DELIVERY_REGIONS: &str = "deliveryRegions";

    /// Default page size for list requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Default starting offset for list requests
    pub const DEFAULT_OFFSET: u32 = 0;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable holding the API token
    pub const TOKEN_ENV_VAR: &str = "CACHEFLY_API_TOKEN";

    /// Environment variable overriding the API base URL
    pub const BASE_URL_ENV_VAR: &str = "CACHEFLY_BASE_URL";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_is_https() {
        assert!(api::DEFAULT_BASE_URL.starts_with("https://"));
        assert!(!api::DEFAULT_BASE_URL.ends_with('/'));
    }

    #[test]
    fn test_default_page_size_positive() {
        assert!(api::DEFAULT_PAGE_SIZE > 0);
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(credentials::TOKEN_ENV_VAR, "CACHEFLY_API_TOKEN");
        assert_eq!(credentials::BASE_URL_ENV_VAR, "CACHEFLY_BASE_URL");
    }
}
