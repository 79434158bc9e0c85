//! Zones, settings projections, cache, firewall and email routing

use super::CloudflareHandler;
use crate::error::Result;
use crate::models::{EmailRouting, EmailRoutingRule, FirewallRule, PurgeResult, Zone};
use crate::purge::PurgeTarget;
use crate::settings::{Projection, SettingsView};
use crate::traits::ApiRequest;

/// Upstream detail seen when email routing was never set up on a zone
pub const EMAIL_ROUTING_UNPROVISIONED: &[&str] =
    &["email routing is not enabled", "not entitled"];

impl CloudflareHandler {
    /// List every zone visible to the credential
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.fetch_all("/zones").await
    }

    /// All settings of a zone that carry a value
    pub async fn get_zone_settings(&self, zone_id: &str) -> Result<SettingsView> {
        self.zone_settings(zone_id, Projection::All).await
    }

    pub async fn get_cache_settings(&self, zone_id: &str) -> Result<SettingsView> {
        self.zone_settings(zone_id, Projection::Cache).await
    }

    pub async fn get_speed_settings(&self, zone_id: &str) -> Result<SettingsView> {
        self.zone_settings(zone_id, Projection::Speed).await
    }

    pub async fn get_security_settings(&self, zone_id: &str) -> Result<SettingsView> {
        self.zone_settings(zone_id, Projection::Security).await
    }

    async fn zone_settings(&self, zone_id: &str, projection: Projection) -> Result<SettingsView> {
        let request = ApiRequest::get(super::zone_path(zone_id, "/settings")?);
        let page = crate::response::into_page(self.send(request).await?);
        Ok(projection.apply(page.items))
    }

    /// Purge cached content of a zone
    ///
    /// The target is validated before any upstream call; see
    /// [`PurgeTarget::select`] for precedence.
    pub async fn purge_cache(
        &self,
        zone_id: &str,
        files: &str,
        tags: &str,
        purge_everything: bool,
    ) -> Result<PurgeResult> {
        let target = PurgeTarget::select(purge_everything, files, tags)?;
        tracing::info!("Purging cache for zone {}: {:?}", zone_id, target);

        self.send(ApiRequest::post(
            super::zone_path(zone_id, "/purge_cache")?,
            target.to_body(),
        ))
        .await?;

        Ok(PurgeResult {
            purged: true,
            zone_id: zone_id.to_string(),
        })
    }

    /// IP access rules of a zone
    pub async fn list_firewall_rules(&self, zone_id: &str) -> Result<Vec<FirewallRule>> {
        self.fetch_all(&super::zone_path(zone_id, "/firewall/access_rules/rules")?)
            .await
    }

    /// Email routing state, or `None` when the zone never had it provisioned
    pub async fn get_email_routing(&self, zone_id: &str) -> Result<Option<EmailRouting>> {
        let request = ApiRequest::get(super::zone_path(zone_id, "/email/routing")?);
        match self.fetch(request).await {
            Ok(routing) => Ok(Some(routing)),
            Err(e) if e.detail_matches(EMAIL_ROUTING_UNPROVISIONED) => {
                tracing::warn!("Email routing not provisioned for zone {}: {}", zone_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Email routing rules; empty when the zone never had routing provisioned
    pub async fn list_email_routing_rules(&self, zone_id: &str) -> Result<Vec<EmailRoutingRule>> {
        let path = super::zone_path(zone_id, "/email/routing/rules")?;
        match self.fetch_all(&path).await {
            Ok(rules) => Ok(rules),
            Err(e) if e.detail_matches(EMAIL_ROUTING_UNPROVISIONED) => {
                tracing::warn!("Email routing not provisioned for zone {}: {}", zone_id, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
