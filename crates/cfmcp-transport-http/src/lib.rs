// # Cloudflare HTTP Transport
//
// This crate provides the reqwest-based `ApiTransport` for cfmcp.
//
// ## Behaviour
//
// - One HTTP request per `send` call
// - Full error propagation; no retry, no backoff, no caching
// - Default timeout of 30 seconds, overridable per request
// - Status codes mapped onto core error kinds (401, 403, 404, other)
// - Cloudflare `errors[]` detail kept in the error message
//
// ## Security Requirements
//
// - Credentials NEVER appear in logs or `Debug` output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - GraphQL Analytics: POST `/graphql`

use async_trait::async_trait;
use cfmcp_core::config::AuthMode;
use cfmcp_core::response::error_detail;
use cfmcp_core::traits::{ApiRequest, ApiTransport, Method, TransportFactory};
use cfmcp_core::{Error, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest transport bound to one credential mode
pub struct HttpTransport {
    /// Resolved credentials
    /// ⚠️ NEVER log this value
    auth: AuthMode,

    /// API base URL, without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("auth", &self.auth.kind())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport against the public Cloudflare API
    pub fn new(auth: AuthMode) -> Result<Self> {
        Self::with_base_url(auth, CLOUDFLARE_API_BASE)
    }

    /// Create a transport against another base URL
    pub fn with_base_url(auth: AuthMode, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            auth,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };

        for (name, value) in self.auth.headers() {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}

/// Map a transport-level reqwest failure
fn map_send_error(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        Error::connection(err.to_string())
    } else {
        Error::Other(format!("HTTP request failed: {}", err))
    }
}

/// Map a non-success status plus its body onto a core error
fn map_status(status: StatusCode, body: &str) -> Error {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| error_detail(&json))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        });

    match status.as_u16() {
        401 => Error::auth(detail),
        403 => Error::permission_denied(detail),
        404 => Error::not_found(detail),
        code => Error::api(code, detail),
    }
}

/// Reject a 2xx body that still reports `"success": false`
fn check_success_flag(status: StatusCode, body: &Value) -> Result<()> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let detail = error_detail(body).unwrap_or_else(|| "request unsuccessful".to_string());
        return Err(Error::api(status.as_u16(), detail));
    }
    Ok(())
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let response = self
            .build(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            tracing::debug!(
                "{} {} failed with status {}",
                request.method.as_str(),
                request.path,
                status
            );
            return Err(map_status(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let body: Value = serde_json::from_str(&text)?;
        check_success_flag(status, &body)?;
        Ok(body)
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

/// Factory producing one `HttpTransport` per tool invocation
#[derive(Debug, Clone)]
pub struct HttpTransportFactory {
    base_url: String,
}

impl Default for HttpTransportFactory {
    fn default() -> Self {
        Self {
            base_url: CLOUDFLARE_API_BASE.to_string(),
        }
    }
}

impl HttpTransportFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl TransportFactory for HttpTransportFactory {
    fn connect(&self, auth: &AuthMode) -> Result<Box<dyn ApiTransport>> {
        Ok(Box::new(HttpTransport::with_base_url(
            auth.clone(),
            self.base_url.clone(),
        )?))
    }
}
