// # API Transport Trait
//
// Defines the seam between the Resource Handler and the wire.
//
// ## Implementations
//
// - reqwest over HTTPS: `cfmcp-transport-http` crate
// - Recording doubles in `tests/common`
//
// ## Contract
//
// A transport sends exactly one request per `send` call and returns the
// decoded JSON body of a successful response. It maps failures onto the core
// error kinds:
//
// - 401 → `Error::Authentication`
// - 403 → `Error::PermissionDenied`
// - 404 → `Error::NotFound`
// - other non-2xx → `Error::Api { status, message }`
// - connect/timeout failures → `Error::Connection`
//
// Transports never retry, never back off and never cache.

use crate::config::AuthMode;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// HTTP method of an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One upstream call, relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path below the API base, starting with `/`
    pub path: String,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Per-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    /// Append a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Override the transport's default timeout for this call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Trait for upstream transports
///
/// Implementations must be thread-safe and usable across async tasks. They
/// are created fresh per tool invocation and hold no state between calls.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send one request and return the decoded response body
    async fn send(&self, request: ApiRequest) -> Result<Value>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}

/// Helper trait for constructing transports from a resolved credential mode
pub trait TransportFactory: Send + Sync {
    /// Create an `ApiTransport` authenticated with `auth`
    fn connect(&self, auth: &AuthMode) -> Result<Box<dyn ApiTransport>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::get("/zones")
            .with_query("page", 2)
            .with_query("per_page", 50);
        assert_eq!(req.method, Method::Get);
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "50".to_string())
            ]
        );
        assert!(req.body.is_none());
        assert!(req.timeout.is_none());

        let req = ApiRequest::post("/graphql", json!({"query": "{}"}))
            .with_timeout(Duration::from_secs(60));
        assert_eq!(req.method.as_str(), "POST");
        assert_eq!(req.timeout, Some(Duration::from_secs(60)));
    }
}
