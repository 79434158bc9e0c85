//! MCP tool surface
//!
//! One `#[tool]` per `ToolService` method. Every tool answers with the JSON
//! envelope text; error envelopes are also flagged as tool errors.

use cfmcp_core::models::{AUTO_TTL, DnsRecordUpdate, NewDnsRecord};
use cfmcp_core::{Envelope, ToolService};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

// ============================================================================
// Parameters
// ============================================================================

fn default_ttl() -> u32 {
    AUTO_TTL
}

fn default_tls() -> String {
    "1.2".to_string()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ZoneParam {
    /// Zone ID (see list_zones)
    pub zone_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AccountParam {
    /// Account ID
    pub account_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDnsRecordParam {
    /// Zone ID
    pub zone_id: String,
    /// Record type (A, AAAA, CNAME, MX, TXT, ...)
    pub record_type: String,
    /// Record name, e.g. www.example.com
    pub name: String,
    /// Record content, e.g. an IP address
    pub content: String,
    /// TTL in seconds; 1 means automatic
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Route traffic through the Cloudflare proxy
    #[serde(default)]
    pub proxied: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDnsRecordParam {
    /// Zone ID
    pub zone_id: String,
    /// DNS record ID (see list_dns_records)
    pub record_id: String,
    /// New record content
    pub content: String,
    /// TTL in seconds; 1 means automatic
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Proxy flag; omit to keep the current value
    pub proxied: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecordParam {
    /// Zone ID
    pub zone_id: String,
    /// DNS record ID
    pub record_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PurgeCacheParam {
    /// Zone ID
    pub zone_id: String,
    /// Comma-separated URLs to purge
    #[serde(default)]
    pub files: String,
    /// Comma-separated cache tags to purge
    #[serde(default)]
    pub tags: String,
    /// Purge everything; takes precedence over files and tags
    #[serde(default)]
    pub purge_everything: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomHostnameParam {
    /// Zone ID
    pub zone_id: String,
    /// Custom hostname, e.g. app.partner.com
    pub hostname: String,
    /// Minimum TLS version: 1.0, 1.1, 1.2 or 1.3
    #[serde(default = "default_tls")]
    pub min_tls_version: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCustomHostnameParam {
    /// Zone ID
    pub zone_id: String,
    /// Custom hostname ID (see list_custom_hostnames)
    pub custom_hostname_id: String,
    /// Minimum TLS version: 1.0, 1.1, 1.2 or 1.3
    #[serde(default = "default_tls")]
    pub min_tls_version: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CustomHostnameParam {
    /// Zone ID
    pub zone_id: String,
    /// Custom hostname ID
    pub custom_hostname_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunAiParam {
    /// Account ID
    pub account_id: String,
    /// Model name, e.g. @cf/meta/llama-3.1-8b-instruct
    pub model_name: String,
    /// User prompt
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WorkerParam {
    /// Account ID
    pub account_id: String,
    /// Worker script name
    pub script_name: String,
}

// ============================================================================
// Server
// ============================================================================

/// Envelope text, flagged as a tool error when the status is error
fn respond(envelope: Envelope) -> Result<String, String> {
    if envelope.is_success() {
        Ok(envelope.to_json())
    } else {
        Err(envelope.to_json())
    }
}

#[derive(Clone)]
pub struct CloudflareServer {
    tools: ToolService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CloudflareServer {
    pub fn new(tools: ToolService) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    // -- Zones & DNS --

    #[tool(description = "List every zone in the account with id, name, status and plan.")]
    async fn list_zones(&self) -> Result<String, String> {
        respond(self.tools.list_zones().await)
    }

    #[tool(description = "List all DNS records of a zone.")]
    async fn list_dns_records(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.list_dns_records(&params.0.zone_id).await)
    }

    #[tool(description = "Create a DNS record. ttl=1 means automatic; proxied defaults to false.")]
    async fn create_dns_record(
        &self,
        params: Parameters<CreateDnsRecordParam>,
    ) -> Result<String, String> {
        let p = params.0;
        let record = NewDnsRecord {
            record_type: p.record_type,
            name: p.name,
            content: p.content,
            ttl: p.ttl,
            proxied: p.proxied,
        };
        respond(self.tools.create_dns_record(&p.zone_id, record).await)
    }

    #[tool(
        description = "Update a DNS record's content and TTL. Name and type are kept; omit proxied to keep the current proxy setting."
    )]
    async fn update_dns_record(
        &self,
        params: Parameters<UpdateDnsRecordParam>,
    ) -> Result<String, String> {
        let p = params.0;
        let update = DnsRecordUpdate {
            content: p.content,
            ttl: p.ttl,
            proxied: p.proxied,
        };
        respond(
            self.tools
                .update_dns_record(&p.zone_id, &p.record_id, update)
                .await,
        )
    }

    #[tool(description = "Delete a DNS record.")]
    async fn delete_dns_record(&self, params: Parameters<RecordParam>) -> Result<String, String> {
        let p = &params.0;
        respond(self.tools.delete_dns_record(&p.zone_id, &p.record_id).await)
    }

    #[tool(description = "Get all settings of a zone as a name to value map.")]
    async fn get_zone_settings(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_zone_settings(&params.0.zone_id).await)
    }

    #[tool(description = "Get the DNSSEC status of a zone.")]
    async fn get_dnssec(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_dnssec(&params.0.zone_id).await)
    }

    #[tool(description = "Get zone-level DNS settings.")]
    async fn get_dns_settings(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_dns_settings(&params.0.zone_id).await)
    }

    // -- Caching, speed, security --

    #[tool(
        description = "Purge zone cache. purge_everything=true wins; otherwise comma-separated files, then comma-separated tags."
    )]
    async fn purge_cache(&self, params: Parameters<PurgeCacheParam>) -> Result<String, String> {
        let p = &params.0;
        respond(
            self.tools
                .purge_cache(&p.zone_id, &p.files, &p.tags, p.purge_everything)
                .await,
        )
    }

    #[tool(description = "Get the cache-related settings of a zone.")]
    async fn get_cache_settings(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_cache_settings(&params.0.zone_id).await)
    }

    #[tool(description = "Get the performance-related settings of a zone.")]
    async fn get_speed_settings(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_speed_settings(&params.0.zone_id).await)
    }

    #[tool(description = "List the IP access rules of a zone.")]
    async fn list_firewall_rules(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.list_firewall_rules(&params.0.zone_id).await)
    }

    #[tool(description = "Get the security-related settings of a zone.")]
    async fn get_security_settings(
        &self,
        params: Parameters<ZoneParam>,
    ) -> Result<String, String> {
        respond(self.tools.get_security_settings(&params.0.zone_id).await)
    }

    // -- SSL/TLS & custom hostnames --

    #[tool(description = "Get the Universal SSL settings of a zone.")]
    async fn get_ssl_settings(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_ssl_settings(&params.0.zone_id).await)
    }

    #[tool(description = "List the certificate packs of a zone.")]
    async fn list_ssl_certificates(
        &self,
        params: Parameters<ZoneParam>,
    ) -> Result<String, String> {
        respond(self.tools.list_ssl_certificates(&params.0.zone_id).await)
    }

    #[tool(
        description = "List custom hostnames of a zone. Empty when the plan has no SSL for SaaS."
    )]
    async fn list_custom_hostnames(
        &self,
        params: Parameters<ZoneParam>,
    ) -> Result<String, String> {
        respond(self.tools.list_custom_hostnames(&params.0.zone_id).await)
    }

    #[tool(description = "Create a custom hostname with an HTTP-validated DV certificate.")]
    async fn create_custom_hostname(
        &self,
        params: Parameters<CreateCustomHostnameParam>,
    ) -> Result<String, String> {
        let p = &params.0;
        respond(
            self.tools
                .create_custom_hostname(&p.zone_id, &p.hostname, &p.min_tls_version)
                .await,
        )
    }

    #[tool(description = "Update the SSL settings of a custom hostname.")]
    async fn update_custom_hostname(
        &self,
        params: Parameters<UpdateCustomHostnameParam>,
    ) -> Result<String, String> {
        let p = &params.0;
        respond(
            self.tools
                .update_custom_hostname(&p.zone_id, &p.custom_hostname_id, &p.min_tls_version)
                .await,
        )
    }

    #[tool(description = "Delete a custom hostname.")]
    async fn delete_custom_hostname(
        &self,
        params: Parameters<CustomHostnameParam>,
    ) -> Result<String, String> {
        let p = &params.0;
        respond(
            self.tools
                .delete_custom_hostname(&p.zone_id, &p.custom_hostname_id)
                .await,
        )
    }

    // -- Email routing --

    #[tool(description = "Get the Email Routing status of a zone; null data when not enabled.")]
    async fn get_email_routing(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_email_routing(&params.0.zone_id).await)
    }

    #[tool(description = "List Email Routing rules of a zone.")]
    async fn list_email_routing_rules(
        &self,
        params: Parameters<ZoneParam>,
    ) -> Result<String, String> {
        respond(self.tools.list_email_routing_rules(&params.0.zone_id).await)
    }

    // -- Analytics, AI, Workers --

    #[tool(
        description = "Summarise the last 24 hours of zone traffic: requests, bandwidth, threats and pageviews."
    )]
    async fn get_zone_analytics(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.get_zone_analytics(&params.0.zone_id).await)
    }

    #[tool(description = "List the Workers AI models available to an account.")]
    async fn list_ai_models(&self, params: Parameters<AccountParam>) -> Result<String, String> {
        respond(self.tools.list_ai_models(&params.0.account_id).await)
    }

    #[tool(description = "Run a Workers AI model on a single user prompt.")]
    async fn run_ai(&self, params: Parameters<RunAiParam>) -> Result<String, String> {
        let p = &params.0;
        respond(
            self.tools
                .run_ai(&p.account_id, &p.model_name, &p.prompt)
                .await,
        )
    }

    #[tool(description = "List the worker scripts of an account.")]
    async fn list_workers(&self, params: Parameters<AccountParam>) -> Result<String, String> {
        respond(self.tools.list_workers(&params.0.account_id).await)
    }

    #[tool(description = "List the worker routes of a zone.")]
    async fn list_worker_routes(&self, params: Parameters<ZoneParam>) -> Result<String, String> {
        respond(self.tools.list_worker_routes(&params.0.zone_id).await)
    }

    #[tool(description = "Get the metadata of one worker script by name.")]
    async fn get_worker(&self, params: Parameters<WorkerParam>) -> Result<String, String> {
        let p = &params.0;
        respond(self.tools.get_worker(&p.account_id, &p.script_name).await)
    }
}

impl ServerHandler for CloudflareServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Cloudflare tool server: zones, DNS, cache, security, SSL, custom hostnames, \
             email routing, analytics, Workers and Workers AI. Every tool returns a JSON \
             envelope {status, data, message}."
                .to_string(),
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_context = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_context).await
    }
}
