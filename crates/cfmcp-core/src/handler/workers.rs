//! Analytics, Workers AI, worker scripts and routes

use super::CloudflareHandler;
use crate::analytics::{self, ANALYTICS_QUERY, AnalyticsSummary};
use crate::error::{Error, Result};
use crate::models::{AiModel, WorkerRoute, WorkerScript};
use crate::traits::ApiRequest;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Inference can take far longer than a management call
pub const AI_RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Upstream detail seen when Workers AI is not available to the account
pub const WORKERS_AI_UNPROVISIONED: &[&str] = &["not entitled", "workers ai is not enabled"];

impl CloudflareHandler {
    /// Traffic summary for the 24 hours ending now
    pub async fn get_zone_analytics(&self, zone_id: &str) -> Result<AnalyticsSummary> {
        self.get_zone_analytics_at(zone_id, Utc::now()).await
    }

    /// Traffic summary for the 24 hours ending at `now`
    ///
    /// A response without the expected `data.viewer.zones[0]` shape is an
    /// all-zero summary, not an error.
    pub async fn get_zone_analytics_at(
        &self,
        zone_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsSummary> {
        let body = json!({
            "query": ANALYTICS_QUERY,
            "variables": analytics::window_variables(zone_id, now),
        });
        let response = self.send(ApiRequest::post("/graphql", body)).await?;
        let buckets = analytics::extract_buckets(&response);
        tracing::debug!("Aggregating {} hourly bucket(s) for zone {}", buckets.len(), zone_id);
        Ok(analytics::aggregate(&buckets))
    }

    /// Workers AI models available to an account
    pub async fn list_ai_models(&self, account_id: &str) -> Result<Vec<AiModel>> {
        let request = ApiRequest::get(super::account_path(account_id, "/ai/models/search")?);
        match self.fetch_list::<Value>(request).await {
            Ok(items) => super::decode_items(items.into_iter().filter(Value::is_object).collect()),
            Err(e) if e.detail_matches(WORKERS_AI_UNPROVISIONED) => {
                tracing::warn!("Workers AI unavailable for account {}: {}", account_id, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Run one chat-style inference
    ///
    /// Returns the upstream `result` object; a missing result is `{}` and any
    /// other non-object result is wrapped as `{"response": "<text>"}`.
    pub async fn run_ai(
        &self,
        account_id: &str,
        model_name: &str,
        prompt: &str,
    ) -> Result<Map<String, Value>> {
        tracing::info!("Running Workers AI model {}", model_name);
        let model_name = super::model_segment("model_name", model_name)?;
        let request = ApiRequest::post(
            super::account_path(account_id, &format!("/ai/run/{}", model_name))?,
            json!({"messages": [{"role": "user", "content": prompt}]}),
        )
        .with_timeout(AI_RUN_TIMEOUT);

        let result = crate::response::into_result(self.send(request).await?);
        Ok(match result {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let text = match other {
                    Value::String(s) => s,
                    v => v.to_string(),
                };
                let mut map = Map::new();
                map.insert("response".to_string(), Value::String(text));
                map
            }
        })
    }

    /// Metadata of every worker script in an account
    pub async fn list_workers(&self, account_id: &str) -> Result<Vec<WorkerScript>> {
        self.fetch_list(ApiRequest::get(super::account_path(
            account_id,
            "/workers/scripts",
        )?))
        .await
    }

    pub async fn list_worker_routes(&self, zone_id: &str) -> Result<Vec<WorkerRoute>> {
        self.fetch_list(ApiRequest::get(super::zone_path(zone_id, "/workers/routes")?))
            .await
    }

    /// Metadata of one worker script
    ///
    /// The single-script endpoint returns the script body, so this lists all
    /// scripts and matches `id` exactly.
    pub async fn get_worker(&self, account_id: &str, script_name: &str) -> Result<WorkerScript> {
        self.list_workers(account_id)
            .await?
            .into_iter()
            .find(|script| script.id == script_name)
            .ok_or_else(|| Error::not_found(format!("Worker script {} not found", script_name)))
    }
}
