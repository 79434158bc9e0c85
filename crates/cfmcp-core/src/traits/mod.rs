//! Core traits for the Cloudflare tool server
//!
//! - [`ApiTransport`]: Send one request to the Cloudflare API
//! - [`TransportFactory`]: Build a transport for a resolved credential mode

pub mod transport;

pub use transport::{ApiRequest, ApiTransport, Method, TransportFactory};
