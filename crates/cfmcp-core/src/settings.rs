//! Zone settings projections
//!
//! `GET /zones/{id}/settings` returns every setting as `{"id", "value", ...}`.
//! The cache, speed and security tools each keep a fixed subset of it.

use serde_json::Value;
use std::collections::BTreeMap;

/// Setting id → value, ordered by id so repeated reads serialize identically
pub type SettingsView = BTreeMap<String, Value>;

/// Cache-related setting ids
pub const CACHE_KEYS: &[&str] = &[
    "always_online",
    "browser_cache_ttl",
    "cache_level",
    "development_mode",
    "edge_cache_ttl",
];

/// Speed-related setting ids
pub const SPEED_KEYS: &[&str] = &[
    "brotli",
    "early_hints",
    "h2_prioritization",
    "http2",
    "http3",
    "minify",
    "mirage",
    "polish",
    "prefetch_preload",
    "rocket_loader",
];

/// Security-related setting ids
pub const SECURITY_KEYS: &[&str] = &[
    "browser_check",
    "challenge_ttl",
    "hotlink_protection",
    "privacy_pass",
    "security_level",
    "waf",
];

/// Which settings a projection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Every setting with a value
    All,
    Cache,
    Speed,
    Security,
}

impl Projection {
    fn allow_list(&self) -> Option<&'static [&'static str]> {
        match self {
            Projection::All => None,
            Projection::Cache => Some(CACHE_KEYS),
            Projection::Speed => Some(SPEED_KEYS),
            Projection::Security => Some(SECURITY_KEYS),
        }
    }

    /// Filter raw setting entries down to this projection
    ///
    /// Entries that are not objects, have no string `id`, or have a null or
    /// missing `value` are dropped.
    pub fn apply(&self, items: Vec<Value>) -> SettingsView {
        let allow = self.allow_list();
        items
            .into_iter()
            .filter_map(|item| {
                let Value::Object(mut entry) = item else {
                    return None;
                };
                let id = entry.get("id")?.as_str()?.to_string();
                if allow.is_some_and(|keys| !keys.contains(&id.as_str())) {
                    return None;
                }
                match entry.remove("value") {
                    None | Some(Value::Null) => None,
                    Some(value) => Some((id, value)),
                }
            })
            .collect()
    }
}
