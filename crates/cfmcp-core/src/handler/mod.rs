// # Resource Handler
//
// One method per Cloudflare operation, split by domain area:
//
// - `zone`: zones, zone settings projections, cache purge, firewall, email routing
// - `dns`: DNS records, DNSSEC, DNS infrastructure settings
// - `ssl`: universal SSL, certificate packs, custom hostnames
// - `workers`: analytics, Workers AI, worker scripts and routes
//
// Every method issues one upstream call (two for the DNS record update,
// which reads before it writes, and one per page for paginated lists),
// reshapes the result into a view from `models`, and either returns it whole
// or raises. Nothing is cached between calls; a handler lives for exactly
// one tool invocation.

mod dns;
mod ssl;
mod workers;
mod zone;

use crate::error::{Error, Result};
use crate::response::{self, Page};
use crate::traits::{ApiRequest, ApiTransport};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Items requested per page on paginated list endpoints
pub const PAGE_SIZE: u32 = 50;

/// Upper bound on pages followed for one list call
const MAX_PAGES: u32 = 1000;

/// Cloudflare API handler over one transport
pub struct CloudflareHandler {
    transport: Box<dyn ApiTransport>,
}

impl std::fmt::Debug for CloudflareHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareHandler")
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}

impl CloudflareHandler {
    pub fn new(transport: Box<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Send one request and return the raw body
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        tracing::debug!(
            "{} {} via {}",
            request.method.as_str(),
            request.path,
            self.transport.transport_name()
        );
        self.transport.send(request).await
    }

    /// Send one request and decode its `result` member
    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_value(response::into_result(body))?)
    }

    /// Send one request and decode its `result` list
    async fn fetch_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        let page = response::into_page(self.send(request).await?);
        decode_items(page.items)
    }

    /// Walk every page of a list endpoint and decode the concatenation
    ///
    /// Stops when `result_info.total_pages` is reached, when upstream reports
    /// no page count, or when a page comes back empty.
    async fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page_no = 1;
        loop {
            let request = ApiRequest::get(path)
                .with_query("page", page_no)
                .with_query("per_page", PAGE_SIZE);
            let Page {
                items: page_items,
                total_pages,
            } = response::into_page(self.send(request).await?);
            let empty = page_items.is_empty();
            items.extend(page_items);

            match total_pages {
                Some(total) if page_no < total && !empty && page_no < MAX_PAGES => page_no += 1,
                _ => break,
            }
        }
        decode_items(items)
    }
}

/// Check that a caller-supplied id stays one path segment
///
/// Rejects empty ids and ids containing `/`, `?`, `#` or `..`, so an id can
/// never step into another zone or account once the URL is normalised.
fn segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.contains(&['/', '?', '#'][..]) {
        return Err(Error::validation(format!(
            "{} must be a single path segment, got '{}'",
            name, value
        )));
    }
    checked(name, value)
}

/// Like [`segment`], but `/` is allowed (model names such as `@cf/meta/...`)
fn model_segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.starts_with('/') || value.contains(&['?', '#'][..]) {
        return Err(Error::validation(format!(
            "{} must be a model name, got '{}'",
            name, value
        )));
    }
    checked(name, value)
}

fn checked<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} must not be empty", name)));
    }
    if value.contains("..") {
        return Err(Error::validation(format!(
            "{} must not contain '..', got '{}'",
            name, value
        )));
    }
    Ok(value)
}

/// `/zones/{zone_id}{rest}`
fn zone_path(zone_id: &str, rest: &str) -> Result<String> {
    Ok(format!("/zones/{}{}", segment("zone_id", zone_id)?, rest))
}

/// `/accounts/{account_id}{rest}`
fn account_path(account_id: &str, rest: &str) -> Result<String> {
    Ok(format!("/accounts/{}{}", segment("account_id", account_id)?, rest))
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_accepts_plain_ids() {
        let id = "023e105f4ecef8ad9ca31a8372d0c353";
        assert_eq!(segment("zone_id", id).unwrap(), id);
        assert_eq!(
            zone_path("z1", "/dns_records").unwrap(),
            "/zones/z1/dns_records"
        );
        assert_eq!(account_path("a1", "").unwrap(), "/accounts/a1");
    }

    #[test]
    fn test_segment_rejects_path_escapes() {
        for bad in ["", " ", "a/b", "..", "r1?x=1", "r1#frag", "../../z2/dns_records/r9"] {
            assert!(
                matches!(segment("record_id", bad), Err(Error::Validation(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_model_segment_allows_slashes() {
        assert!(model_segment("model_name", "@cf/meta/llama-3.1-8b-instruct").is_ok());
        assert!(model_segment("model_name", "/etc").is_err());
        assert!(model_segment("model_name", "@cf/../../scripts").is_err());
        assert!(model_segment("model_name", "@cf/m?x").is_err());
    }
}
