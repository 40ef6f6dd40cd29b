use std::fmt;

/// Error type for CacheFly API and provider operations
#[derive(Debug)]
pub enum CacheFlyError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// Token not found in any source
    TokenNotFound(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// A page fetch failed while collecting a paginated list
    FetchFailed {
        context: String,
        offset: u32,
        source: Box<CacheFlyError>,
    },
    /// A paginated collection did not finish before its deadline
    Timeout(String),
}

impl fmt::Display for CacheFlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheFlyError::Http(e) => write!(f, "HTTP request failed: {}", e),
            CacheFlyError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            CacheFlyError::TokenNotFound(msg) => write!(f, "{}", msg),
            CacheFlyError::Json(msg) => write!(f, "JSON error: {}", msg),
            CacheFlyError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CacheFlyError::FetchFailed {
                context,
                offset,
                source,
            } => write!(
                f,
                "Failed to fetch {} at offset {}: {}",
                context, offset, source
            ),
            CacheFlyError::Timeout(context) => {
                write!(f, "Timed out while fetching {}", context)
            }
        }
    }
}

impl std::error::Error for CacheFlyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheFlyError::Http(e) => Some(e),
            CacheFlyError::FetchFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl CacheFlyError {
    /// HTTP status of the underlying API error, if any
    ///
    /// Looks through `FetchFailed` wrappers so callers can detect a 404
    /// regardless of whether it came from a single fetch or a list.
    pub fn status(&self) -> Option<u16> {
        match self {
            CacheFlyError::Api { status, .. } => Some(*status),
            CacheFlyError::Http(e) => e.status().map(|s| s.as_u16()),
            CacheFlyError::FetchFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this error means the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for CacheFlyError {
    fn from(err: reqwest::Error) -> Self {
        CacheFlyError::Http(err)
    }
}

impl From<serde_json::Error> for CacheFlyError {
    fn from(err: serde_json::Error) -> Self {
        CacheFlyError::Json(err.to_string())
    }
}

impl From<std::io::Error> for CacheFlyError {
    fn from(err: std::io::Error) -> Self {
        CacheFlyError::Config(err.to_string())
    }
}

/// Result type alias for CacheFly operations
pub type Result<T> = std::result::Result<T, CacheFlyError>;
