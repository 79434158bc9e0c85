// # Tool Service
//
// The invocation boundary. Each public method is one remotely-invocable tool:
//
// 1. resolve credentials and build a fresh transport + handler
// 2. run the handler operation
// 3. turn the outcome into an `Envelope`, mapping errors via `mapper`
//
// Callers never see an `Error`, only envelopes. No state survives between
// calls apart from the injected credentials and transport factory.

use crate::config::Credentials;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::handler::CloudflareHandler;
use crate::mapper::{self, Subject};
use crate::models::{DnsRecordUpdate, NewDnsRecord, TlsVersion};
use crate::traits::TransportFactory;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Tool entry points over injected credentials and a transport factory
#[derive(Clone)]
pub struct ToolService {
    credentials: Credentials,
    factory: Arc<dyn TransportFactory>,
}

impl std::fmt::Debug for ToolService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolService")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl ToolService {
    pub fn new(credentials: Credentials, factory: Arc<dyn TransportFactory>) -> Self {
        Self {
            credentials,
            factory,
        }
    }

    /// Build a handler for one invocation
    fn handler(&self) -> Result<CloudflareHandler> {
        let auth = self.credentials.resolve()?;
        tracing::debug!("Resolved {} credentials", auth.kind());
        Ok(CloudflareHandler::new(self.factory.connect(&auth)?))
    }

    async fn invoke<T, F, Fut>(&self, tool: &'static str, subject: Subject<'_>, op: F) -> Envelope
    where
        T: Serialize,
        F: FnOnce(CloudflareHandler) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let outcome = match self.handler() {
            Ok(handler) => op(handler).await,
            Err(e) => Err(e),
        };
        let outcome = outcome.and_then(|data| serde_json::to_value(data).map_err(Error::from));

        match outcome {
            Ok(data) => {
                tracing::debug!("Tool {} succeeded", tool);
                Envelope::success(data)
            }
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", tool, e);
                Envelope::error(mapper::describe(&e, subject))
            }
        }
    }

    // -- Zones & DNS --

    pub async fn list_zones(&self) -> Envelope {
        self.invoke("list_zones", Subject::Account, |h| async move {
            h.list_zones().await
        })
        .await
    }

    pub async fn list_dns_records(&self, zone_id: &str) -> Envelope {
        self.invoke("list_dns_records", Subject::Zone(zone_id), |h| async move {
            h.list_dns_records(zone_id).await
        })
        .await
    }

    pub async fn create_dns_record(&self, zone_id: &str, record: NewDnsRecord) -> Envelope {
        self.invoke("create_dns_record", Subject::Zone(zone_id), |h| async move {
            h.create_dns_record(zone_id, &record).await
        })
        .await
    }

    pub async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: DnsRecordUpdate,
    ) -> Envelope {
        self.invoke("update_dns_record", Subject::DnsRecord(record_id), |h| async move {
            h.update_dns_record(zone_id, record_id, &update).await
        })
        .await
    }

    pub async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Envelope {
        self.invoke("delete_dns_record", Subject::DnsRecord(record_id), |h| async move {
            h.delete_dns_record(zone_id, record_id).await
        })
        .await
    }

    pub async fn get_zone_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_zone_settings", Subject::Zone(zone_id), |h| async move {
            h.get_zone_settings(zone_id).await
        })
        .await
    }

    pub async fn get_dnssec(&self, zone_id: &str) -> Envelope {
        self.invoke("get_dnssec", Subject::Zone(zone_id), |h| async move {
            h.get_dnssec(zone_id).await
        })
        .await
    }

    pub async fn get_dns_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_dns_settings", Subject::Zone(zone_id), |h| async move {
            h.get_dns_settings(zone_id).await
        })
        .await
    }

    // -- Caching, speed, security --

    pub async fn purge_cache(
        &self,
        zone_id: &str,
        files: &str,
        tags: &str,
        purge_everything: bool,
    ) -> Envelope {
        self.invoke("purge_cache", Subject::CachePurge(zone_id), |h| async move {
            h.purge_cache(zone_id, files, tags, purge_everything).await
        })
        .await
    }

    pub async fn get_cache_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_cache_settings", Subject::Zone(zone_id), |h| async move {
            h.get_cache_settings(zone_id).await
        })
        .await
    }

    pub async fn get_speed_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_speed_settings", Subject::Zone(zone_id), |h| async move {
            h.get_speed_settings(zone_id).await
        })
        .await
    }

    pub async fn list_firewall_rules(&self, zone_id: &str) -> Envelope {
        self.invoke("list_firewall_rules", Subject::Zone(zone_id), |h| async move {
            h.list_firewall_rules(zone_id).await
        })
        .await
    }

    pub async fn get_security_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_security_settings", Subject::Zone(zone_id), |h| async move {
            h.get_security_settings(zone_id).await
        })
        .await
    }

    // -- SSL/TLS & custom hostnames --

    pub async fn get_ssl_settings(&self, zone_id: &str) -> Envelope {
        self.invoke("get_ssl_settings", Subject::Zone(zone_id), |h| async move {
            h.get_ssl_settings(zone_id).await
        })
        .await
    }

    pub async fn list_ssl_certificates(&self, zone_id: &str) -> Envelope {
        self.invoke("list_ssl_certificates", Subject::Zone(zone_id), |h| async move {
            h.list_ssl_certificates(zone_id).await
        })
        .await
    }

    pub async fn list_custom_hostnames(&self, zone_id: &str) -> Envelope {
        self.invoke("list_custom_hostnames", Subject::Zone(zone_id), |h| async move {
            h.list_custom_hostnames(zone_id).await
        })
        .await
    }

    /// `min_tls_version` is parsed here so a bad value fails before any upstream call
    pub async fn create_custom_hostname(
        &self,
        zone_id: &str,
        hostname: &str,
        min_tls_version: &str,
    ) -> Envelope {
        self.invoke("create_custom_hostname", Subject::Zone(zone_id), |h| async move {
            let tls: TlsVersion = min_tls_version.parse()?;
            h.create_custom_hostname(zone_id, hostname, tls).await
        })
        .await
    }

    pub async fn update_custom_hostname(
        &self,
        zone_id: &str,
        custom_hostname_id: &str,
        min_tls_version: &str,
    ) -> Envelope {
        self.invoke(
            "update_custom_hostname",
            Subject::CustomHostname(custom_hostname_id),
            |h| async move {
                let tls: TlsVersion = min_tls_version.parse()?;
                h.update_custom_hostname(zone_id, custom_hostname_id, tls)
                    .await
            },
        )
        .await
    }

    pub async fn delete_custom_hostname(&self, zone_id: &str, custom_hostname_id: &str) -> Envelope {
        self.invoke(
            "delete_custom_hostname",
            Subject::CustomHostname(custom_hostname_id),
            |h| async move { h.delete_custom_hostname(zone_id, custom_hostname_id).await },
        )
        .await
    }

    // -- Email routing --

    pub async fn get_email_routing(&self, zone_id: &str) -> Envelope {
        self.invoke("get_email_routing", Subject::Zone(zone_id), |h| async move {
            h.get_email_routing(zone_id).await
        })
        .await
    }

    pub async fn list_email_routing_rules(&self, zone_id: &str) -> Envelope {
        self.invoke("list_email_routing_rules", Subject::Zone(zone_id), |h| async move {
            h.list_email_routing_rules(zone_id).await
        })
        .await
    }

    // -- Analytics, AI, Workers --

    pub async fn get_zone_analytics(&self, zone_id: &str) -> Envelope {
        self.invoke("get_zone_analytics", Subject::Zone(zone_id), |h| async move {
            h.get_zone_analytics(zone_id).await
        })
        .await
    }

    pub async fn list_ai_models(&self, account_id: &str) -> Envelope {
        self.invoke("list_ai_models", Subject::Account, |h| async move {
            h.list_ai_models(account_id).await
        })
        .await
    }

    pub async fn run_ai(&self, account_id: &str, model_name: &str, prompt: &str) -> Envelope {
        self.invoke("run_ai", Subject::Account, |h| async move {
            h.run_ai(account_id, model_name, prompt).await
        })
        .await
    }

    pub async fn list_workers(&self, account_id: &str) -> Envelope {
        self.invoke("list_workers", Subject::Account, |h| async move {
            h.list_workers(account_id).await
        })
        .await
    }

    pub async fn list_worker_routes(&self, zone_id: &str) -> Envelope {
        self.invoke("list_worker_routes", Subject::Zone(zone_id), |h| async move {
            h.list_worker_routes(zone_id).await
        })
        .await
    }

    pub async fn get_worker(&self, account_id: &str, script_name: &str) -> Envelope {
        self.invoke("get_worker", Subject::WorkerScript(script_name), |h| async move {
            h.get_worker(account_id, script_name).await
        })
        .await
    }
}
