//! DNS records, DNSSEC and DNS infrastructure settings

use super::CloudflareHandler;
use crate::error::Result;
use crate::models::{DeletedRecord, DnsRecord, DnsRecordUpdate, Dnssec, NewDnsRecord};
use crate::traits::ApiRequest;
use serde_json::{Map, Value, json};

impl CloudflareHandler {
    /// All DNS records of a zone
    pub async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.fetch_all(&super::zone_path(zone_id, "/dns_records")?)
            .await
    }

    pub async fn create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> Result<DnsRecord> {
        tracing::info!(
            "Creating {} record {} in zone {}",
            record.record_type,
            record.name,
            zone_id
        );
        let body = serde_json::to_value(record)?;
        self.fetch(ApiRequest::post(super::zone_path(zone_id, "/dns_records")?, body))
            .await
    }

    /// Update a record's content, TTL and proxy flag
    ///
    /// Reads the record first and carries its `name` and `type` into the
    /// write unchanged. `proxied: None` keeps the record's current flag.
    ///
    /// ```http
    /// GET   /zones/:zone_id/dns_records/:record_id
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// ```
    pub async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
    ) -> Result<DnsRecord> {
        let record_id = super::segment("record_id", record_id)?;
        let path = super::zone_path(zone_id, &format!("/dns_records/{}", record_id))?;
        let existing: DnsRecord = self.fetch(ApiRequest::get(path.clone())).await?;

        let proxied = update.proxied.unwrap_or(existing.proxied);
        tracing::info!(
            "Updating {} record {}: {} -> {} (proxied: {})",
            existing.record_type,
            existing.name,
            existing.content,
            update.content,
            proxied
        );

        let body = json!({
            "name": existing.name,
            "type": existing.record_type,
            "content": update.content,
            "ttl": update.ttl,
            "proxied": proxied,
        });
        self.fetch(ApiRequest::patch(path, body)).await
    }

    pub async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<DeletedRecord> {
        tracing::info!("Deleting DNS record {} in zone {}", record_id, zone_id);
        let record_id = super::segment("record_id", record_id)?;
        self.send(ApiRequest::delete(super::zone_path(
            zone_id,
            &format!("/dns_records/{}", record_id),
        )?))
        .await?;

        Ok(DeletedRecord {
            deleted: true,
            record_id: record_id.to_string(),
        })
    }

    pub async fn get_dnssec(&self, zone_id: &str) -> Result<Dnssec> {
        self.fetch(ApiRequest::get(super::zone_path(zone_id, "/dnssec")?))
            .await
    }

    /// DNS infrastructure settings, passed through as upstream returns them
    ///
    /// A non-object `result` becomes an empty object.
    pub async fn get_dns_settings(&self, zone_id: &str) -> Result<Map<String, Value>> {
        let body = self
            .send(ApiRequest::get(super::zone_path(zone_id, "/dns_settings")?))
            .await?;
        match crate::response::into_result(body) {
            Value::Object(settings) => Ok(settings),
            _ => Ok(Map::new()),
        }
    }
}
