//! Upstream response normalisation
//!
//! Cloudflare wraps every REST payload as
//! `{"success": .., "errors": [..], "result": .., "result_info": {..}}`.
//! This is the one place that unwraps it; call sites only ever see the
//! `result` value or a flat list of items.

use serde::Deserialize;
use serde_json::Value;

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items on this page
    pub items: Vec<Value>,
    /// Total page count, when upstream reports it
    pub total_pages: Option<u32>,
}

#[derive(Deserialize)]
struct ResultInfo {
    #[serde(default)]
    total_pages: Option<u32>,
}

/// Extract the `result` member of a response body
///
/// Missing `result` yields `Value::Null`.
pub fn into_result(body: Value) -> Value {
    match body {
        Value::Object(mut map) => map.remove("result").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Normalise a list response into a [`Page`]
///
/// Accepts both the wrapped shape and a bare JSON array. A `result` that is
/// not an array is an empty page.
pub fn into_page(body: Value) -> Page {
    match body {
        Value::Array(items) => Page {
            items,
            total_pages: None,
        },
        Value::Object(mut map) => {
            let total_pages = map
                .remove("result_info")
                .and_then(|info| serde_json::from_value::<ResultInfo>(info).ok())
                .and_then(|info| info.total_pages);
            let items = match map.remove("result") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            Page { items, total_pages }
        }
        _ => Page {
            items: Vec::new(),
            total_pages: None,
        },
    }
}

/// Join a Cloudflare `errors[]` array into one detail string
///
/// Each entry renders as `<code>: <message>`; returns `None` when the body
/// carries no usable errors.
pub fn error_detail(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let parts: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let message = e.get("message").and_then(Value::as_str)?;
            Some(match e.get("code").and_then(Value::as_i64) {
                Some(code) => format!("{}: {}", code, message),
                None => message.to_string(),
            })
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
