//! Test doubles and common utilities for contract tests
//!
//! `MockTransport` answers scripted routes keyed by `"METHOD /path"` and
//! records every request it sees, in order. `MockTransportFactory` hands out
//! clones sharing that state and records the credential mode of each connect.

#![allow(dead_code)]

use cfmcp_core::error::{Error, Result};
use cfmcp_core::traits::{ApiRequest, ApiTransport, TransportFactory};
use cfmcp_core::{AuthMode, Credentials, ToolService};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Responder = Arc<dyn Fn(&ApiRequest) -> Result<Value> + Send + Sync>;

/// A scripted transport that records requests
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, Responder>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method, path)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a fixed body
    pub fn on(self, method: &str, path: &str, body: Value) -> Self {
        self.on_with(method, path, move |_| Ok(body.clone()))
    }

    /// Answer `method path` with a fixed error
    pub fn fail(self, method: &str, path: &str, make: fn() -> Error) -> Self {
        self.on_with(method, path, move |_| Err(make()))
    }

    /// Answer `method path` with a closure over the request
    pub fn on_with<F>(self, method: &str, path: &str, responder: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value> + Send + Sync + 'static,
    {
        self.routes
            .lock()
            .unwrap()
            .insert(route_key(method, path), Arc::new(responder));
        self
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `"METHOD /path"` of every request seen so far
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| route_key(r.method.as_str(), &r.path))
            .collect()
    }
}

#[async_trait::async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let key = route_key(request.method.as_str(), &request.path);
        let responder = self.routes.lock().unwrap().get(&key).cloned();
        match responder {
            Some(responder) => responder(&request),
            None => Err(Error::not_found(format!("no scripted route for {}", key))),
        }
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory over a shared `MockTransport`
#[derive(Clone, Default)]
pub struct MockTransportFactory {
    pub transport: MockTransport,
    connects: Arc<Mutex<Vec<AuthMode>>>,
}

impl MockTransportFactory {
    pub fn new(transport: MockTransport) -> Self {
        Self {
            transport,
            connects: Arc::default(),
        }
    }

    /// Credential modes of every connect, in order
    pub fn connects(&self) -> Vec<AuthMode> {
        self.connects.lock().unwrap().clone()
    }
}

impl TransportFactory for MockTransportFactory {
    fn connect(&self, auth: &AuthMode) -> Result<Box<dyn ApiTransport>> {
        self.connects.lock().unwrap().push(auth.clone());
        Ok(Box::new(self.transport.clone()))
    }
}

/// A `ToolService` with a bearer token over `transport`
pub fn service(transport: &MockTransport) -> (ToolService, MockTransportFactory) {
    service_with(Credentials::token("test-token"), transport)
}

pub fn service_with(
    credentials: Credentials,
    transport: &MockTransport,
) -> (ToolService, MockTransportFactory) {
    let factory = MockTransportFactory::new(transport.clone());
    let tools = ToolService::new(credentials, Arc::new(factory.clone()));
    (tools, factory)
}

/// Cloudflare v4 success body
pub fn ok(result: Value) -> Value {
    json!({"success": true, "errors": [], "messages": [], "result": result})
}

/// Cloudflare v4 success body for one page of a list
pub fn page(items: Value, page: u32, total_pages: u32) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": items,
        "result_info": {"page": page, "per_page": 50, "total_pages": total_pages},
    })
}

/// Parse an envelope string back into JSON
pub fn parse(envelope: &cfmcp_core::Envelope) -> Value {
    serde_json::from_str(&envelope.to_json()).unwrap()
}

/// Query value of `key` on a recorded request
pub fn query(request: &ApiRequest, key: &str) -> Option<String> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}
