// # cfmcp-core
//
// Core library for the Cloudflare tool server.
//
// ## Architecture Overview
//
// - **Credentials / AuthMode**: pick bearer-token or key+email auth per call
// - **ApiTransport**: trait for sending one request to the Cloudflare API
// - **CloudflareHandler**: one method per API operation, reshaping results
//   into plain views
// - **Envelope**: the fixed success/error wrapper every tool returns
// - **mapper**: turns handler errors into caller-facing messages
// - **ToolService**: the invocation boundary tying the above together
//
// ## Design Principles
//
// 1. **Stateless**: a fresh transport and handler per tool invocation
// 2. **Single-shot**: one upstream round trip per operation (two for the
//    read-then-patch DNS update), no retries, no caching
// 3. **Library-first**: the binary only wires this crate to a protocol server

pub mod analytics;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod mapper;
pub mod models;
pub mod purge;
pub mod response;
pub mod settings;
pub mod tools;
pub mod traits;

// Re-export core types for convenience
pub use analytics::AnalyticsSummary;
pub use config::{AuthMode, Credentials};
pub use envelope::{Envelope, Status};
pub use error::{Error, Result};
pub use handler::CloudflareHandler;
pub use tools::ToolService;
pub use traits::{ApiRequest, ApiTransport, Method, TransportFactory};
