//! Universal SSL, certificate packs and custom hostnames

use super::CloudflareHandler;
use crate::error::Result;
use crate::models::{CertificatePack, CustomHostname, DeletedHostname, SslSettings, TlsVersion};
use crate::traits::ApiRequest;
use serde_json::{Value, json};

/// Upstream detail seen when the zone's plan has no SSL for SaaS
pub const CUSTOM_HOSTNAMES_UNPROVISIONED: &[&str] = &["1550", "saas"];

/// HTTP-validated DV certificate with a minimum TLS version
fn dv_ssl(min_tls_version: TlsVersion) -> Value {
    json!({
        "method": "http",
        "type": "dv",
        "settings": {"min_tls_version": min_tls_version.as_str()},
    })
}

impl CloudflareHandler {
    pub async fn get_ssl_settings(&self, zone_id: &str) -> Result<SslSettings> {
        self.fetch(ApiRequest::get(super::zone_path(
            zone_id,
            "/ssl/universal/settings",
        )?))
        .await
    }

    pub async fn list_ssl_certificates(&self, zone_id: &str) -> Result<Vec<CertificatePack>> {
        self.fetch_all(&super::zone_path(zone_id, "/ssl/certificate_packs")?)
            .await
    }

    /// Custom hostnames of a zone; empty when the plan lacks SSL for SaaS
    pub async fn list_custom_hostnames(&self, zone_id: &str) -> Result<Vec<CustomHostname>> {
        let path = super::zone_path(zone_id, "/custom_hostnames")?;
        match self.fetch_all(&path).await {
            Ok(hostnames) => Ok(hostnames),
            Err(e) if e.detail_matches(CUSTOM_HOSTNAMES_UNPROVISIONED) => {
                tracing::warn!("Custom hostnames unavailable for zone {}: {}", zone_id, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn create_custom_hostname(
        &self,
        zone_id: &str,
        hostname: &str,
        min_tls_version: TlsVersion,
    ) -> Result<CustomHostname> {
        tracing::info!(
            "Creating custom hostname {} in zone {} (min TLS {})",
            hostname,
            zone_id,
            min_tls_version.as_str()
        );
        let body = json!({
            "hostname": hostname,
            "ssl": dv_ssl(min_tls_version),
        });
        self.fetch(ApiRequest::post(
            super::zone_path(zone_id, "/custom_hostnames")?,
            body,
        ))
        .await
    }

    /// Re-issue a custom hostname's certificate settings
    pub async fn update_custom_hostname(
        &self,
        zone_id: &str,
        custom_hostname_id: &str,
        min_tls_version: TlsVersion,
    ) -> Result<CustomHostname> {
        tracing::info!(
            "Updating custom hostname {} in zone {} (min TLS {})",
            custom_hostname_id,
            zone_id,
            min_tls_version.as_str()
        );
        let custom_hostname_id = super::segment("custom_hostname_id", custom_hostname_id)?;
        self.fetch(ApiRequest::patch(
            super::zone_path(zone_id, &format!("/custom_hostnames/{}", custom_hostname_id))?,
            json!({"ssl": dv_ssl(min_tls_version)}),
        ))
        .await
    }

    pub async fn delete_custom_hostname(
        &self,
        zone_id: &str,
        custom_hostname_id: &str,
    ) -> Result<DeletedHostname> {
        tracing::info!(
            "Deleting custom hostname {} in zone {}",
            custom_hostname_id,
            zone_id
        );
        let custom_hostname_id = super::segment("custom_hostname_id", custom_hostname_id)?;
        self.send(ApiRequest::delete(super::zone_path(
            zone_id,
            &format!("/custom_hostnames/{}", custom_hostname_id),
        )?))
        .await?;

        Ok(DeletedHostname {
            deleted: true,
            custom_hostname_id: custom_hostname_id.to_string(),
        })
    }
}
