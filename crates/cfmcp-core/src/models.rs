//! Plain views of upstream resources
//!
//! Each struct deserializes from the Cloudflare API v4 `result` shape and
//! serializes to exactly the fields a tool returns. Upstream fields that are
//! not listed here are dropped on deserialization.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A managed domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneWire")]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    /// Plan name, flattened from the upstream `plan` object
    pub plan: Option<String>,
}

#[derive(Deserialize)]
struct ZoneWire {
    id: String,
    name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    plan: Option<PlanWire>,
}

#[derive(Deserialize)]
struct PlanWire {
    #[serde(default)]
    name: Option<String>,
}

impl From<ZoneWire> for Zone {
    fn from(wire: ZoneWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            status: wire.status,
            plan: wire.plan.and_then(|p| p.name),
        }
    }
}

/// A DNS resource record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "auto_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
}

/// TTL value meaning "automatic"
pub const AUTO_TTL: u32 = 1;

fn auto_ttl() -> u32 {
    AUTO_TTL
}

/// Parameters for creating a DNS record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

/// Parameters for updating a DNS record
///
/// `proxied: None` keeps whatever the record currently has.
#[derive(Debug, Clone, PartialEq)]
pub struct DnsRecordUpdate {
    pub content: String,
    pub ttl: u32,
    pub proxied: Option<bool>,
}

/// Outcome of a DNS record delete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedRecord {
    pub deleted: bool,
    pub record_id: String,
}

/// DNSSEC state of a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dnssec {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ds: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub digest_type: Option<String>,
}

/// An IP access rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub configuration: Value,
}

/// Outcome of a cache purge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeResult {
    pub purged: bool,
    pub zone_id: String,
}

/// Universal SSL settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SslSettings {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub certificate_authority: Option<String>,
}

/// An issued certificate pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificatePack {
    pub id: String,
    #[serde(rename = "type", default)]
    pub pack_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
}

/// A SaaS custom hostname bound to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomHostname {
    pub id: String,
    pub hostname: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Outcome of a custom hostname delete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedHostname {
    pub deleted: bool,
    pub custom_hostname_id: String,
}

/// Minimum TLS version accepted on a custom hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVersion {
    V1_0,
    V1_1,
    #[default]
    V1_2,
    V1_3,
}

impl TlsVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsVersion::V1_0 => "1.0",
            TlsVersion::V1_1 => "1.1",
            TlsVersion::V1_2 => "1.2",
            TlsVersion::V1_3 => "1.3",
        }
    }
}

impl FromStr for TlsVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1.0" => Ok(TlsVersion::V1_0),
            "1.1" => Ok(TlsVersion::V1_1),
            "1.2" => Ok(TlsVersion::V1_2),
            "1.3" => Ok(TlsVersion::V1_3),
            other => Err(Error::validation(format!(
                "min_tls_version must be one of 1.0, 1.1, 1.2, 1.3, got '{}'",
                other
            ))),
        }
    }
}

/// Email routing state of a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRouting {
    #[serde(default, alias = "tag")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One email routing rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRoutingRule {
    #[serde(default, alias = "tag")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Worker script metadata (never the script body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerScript {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_on: String,
    #[serde(default)]
    pub modified_on: String,
    #[serde(default)]
    pub etag: String,
}

/// A URL pattern bound to a worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRoute {
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub script: Option<String>,
}

/// A Workers AI model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "empty_object")]
    pub task: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}
