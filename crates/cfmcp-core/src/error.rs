//! Error types for the Cloudflare tool server
//!
//! One variant per failure kind a tool invocation can surface. The handler
//! raises these; only [`crate::mapper`] turns them into caller-facing text.

use thiserror::Error;

/// Result type alias for cfmcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the Cloudflare tool server
#[derive(Error, Debug)]
pub enum Error {
    /// Neither credential mode is satisfied
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream rejected the credentials (HTTP 401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Referenced resource does not exist upstream (HTTP 404, or no match in a listing)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials lack the capability for this call (HTTP 403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Caller-supplied parameters violate a local precondition
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure reaching upstream
    #[error("Connection error: {0}")]
    Connection(String),

    /// Upstream answered with any other non-success status
    #[error("Cloudflare API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Joined upstream `errors[]` detail
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a permission error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an upstream API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the upstream detail of this error contains any of `markers`
    ///
    /// Only `Api` and `PermissionDenied` carry upstream detail worth matching;
    /// authentication, not-found and transport failures never match.
    pub fn detail_matches(&self, markers: &[&str]) -> bool {
        let detail = match self {
            Self::Api { message, .. } => message,
            Self::PermissionDenied(message) => message,
            _ => return false,
        };
        let detail = detail.to_lowercase();
        markers
            .iter()
            .any(|marker| detail.contains(&marker.to_lowercase()))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
