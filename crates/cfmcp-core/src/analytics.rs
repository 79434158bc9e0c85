// # Analytics Aggregator
//
// Sums the hourly `httpRequests1hGroups` buckets of the GraphQL analytics API
// into a 24-hour summary. Everything here is pure; the handler does the I/O.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Hourly traffic for one zone over a trailing window, oldest bucket first
pub const ANALYTICS_QUERY: &str = r#"
query($zoneTag: String!, $start: Time!, $end: Time!) {
  viewer {
    zones(filter: {zoneTag: $zoneTag}) {
      httpRequests1hGroups(
        limit: 24
        orderBy: [datetimeHour_ASC]
        filter: {datetimeHour_geq: $start, datetimeHour_lt: $end}
      ) {
        sum {
          requests
          cachedRequests
          bytes
          cachedBytes
          threats
          pageViews
        }
      }
    }
  }
}
"#;

/// Length of the trailing window
pub const WINDOW_HOURS: i64 = 24;

/// Total split into cached and uncached parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CachedTotals {
    pub total: u64,
    pub cached: u64,
    pub uncached: u64,
}

impl CachedTotals {
    fn new(total: u64, cached: u64) -> Self {
        Self {
            total,
            cached,
            uncached: total.saturating_sub(cached),
        }
    }
}

/// A plain total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Total {
    pub total: u64,
}

/// 24-hour traffic summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub requests: CachedTotals,
    pub bandwidth: CachedTotals,
    pub threats: Total,
    pub pageviews: Total,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BucketSum {
    requests: u64,
    cached_requests: u64,
    bytes: u64,
    cached_bytes: u64,
    threats: u64,
    page_views: u64,
}

/// GraphQL variables for the window ending at `now`
///
/// Timestamps are UTC, second precision, `Z`-suffixed.
pub fn window_variables(zone_id: &str, now: DateTime<Utc>) -> Value {
    let start = now - Duration::hours(WINDOW_HOURS);
    json!({
        "zoneTag": zone_id,
        "start": start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "end": now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    })
}

/// Pull the bucket list out of a GraphQL response body
///
/// Any missing or mistyped level (`data`, `viewer`, `zones[0]`,
/// `httpRequests1hGroups`) yields an empty list.
pub fn extract_buckets(body: &Value) -> Vec<Value> {
    body.get("data")
        .and_then(|d| d.get("viewer"))
        .and_then(|v| v.get("zones"))
        .and_then(Value::as_array)
        .and_then(|zones| zones.first())
        .and_then(|zone| zone.get("httpRequests1hGroups"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Sum hourly buckets into a summary
///
/// Buckets without a well-formed `sum` object are skipped. Missing counters
/// inside a `sum` count as zero.
pub fn aggregate(buckets: &[Value]) -> AnalyticsSummary {
    let mut acc = BucketSum::default();
    for bucket in buckets {
        let Some(sum) = bucket.get("sum").filter(|s| s.is_object()) else {
            continue;
        };
        let Ok(sum) = BucketSum::deserialize(sum) else {
            continue;
        };
        acc.requests += sum.requests;
        acc.cached_requests += sum.cached_requests;
        acc.bytes += sum.bytes;
        acc.cached_bytes += sum.cached_bytes;
        acc.threats += sum.threats;
        acc.page_views += sum.page_views;
    }

    AnalyticsSummary {
        requests: CachedTotals::new(acc.requests, acc.cached_requests),
        bandwidth: CachedTotals::new(acc.bytes, acc.cached_bytes),
        threats: Total { total: acc.threats },
        pageviews: Total {
            total: acc.page_views,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_two_buckets_sum_and_split() {
        let buckets = vec![
            json!({"sum": {"requests": 600, "cachedRequests": 500, "bytes": 10, "cachedBytes": 4, "threats": 1, "pageViews": 7}}),
            json!({"sum": {"requests": 400, "cachedRequests": 300, "bytes": 5, "cachedBytes": 5, "threats": 0, "pageViews": 3}}),
        ];
        let summary = aggregate(&buckets);
        assert_eq!(
            summary.requests,
            CachedTotals {
                total: 1000,
                cached: 800,
                uncached: 200
            }
        );
        assert_eq!(summary.bandwidth.uncached, 6);
        assert_eq!(summary.threats.total, 1);
        assert_eq!(summary.pageviews.total, 10);
    }

    #[test]
    fn test_empty_is_all_zero() {
        let summary = aggregate(&[]);
        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({
                "requests": {"total": 0, "cached": 0, "uncached": 0},
                "bandwidth": {"total": 0, "cached": 0, "uncached": 0},
                "threats": {"total": 0},
                "pageviews": {"total": 0}
            })
        );
    }

    #[test]
    fn test_malformed_buckets_are_skipped() {
        let buckets = vec![
            json!("not a bucket"),
            json!({"sum": null}),
            json!({"sum": {"requests": "many"}}),
            json!({"nosum": {}}),
            json!({"sum": {"requests": 5}}),
        ];
        let summary = aggregate(&buckets);
        assert_eq!(summary.requests.total, 5);
        assert_eq!(summary.requests.uncached, 5);
    }

    #[test]
    fn test_extract_buckets_degrades_to_empty() {
        assert!(extract_buckets(&json!({})).is_empty());
        assert!(extract_buckets(&json!({"data": {"viewer": {"zones": []}}})).is_empty());
        assert!(extract_buckets(&json!({"data": null, "errors": [{"message": "x"}]})).is_empty());

        let body = json!({"data": {"viewer": {"zones": [{"httpRequests1hGroups": [{"sum": {}}]}]}}});
        assert_eq!(extract_buckets(&body).len(), 1);
    }

    #[test]
    fn test_window_is_trailing_24h_utc() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 15).unwrap();
        let vars = window_variables("zone-1", now);
        assert_eq!(vars["zoneTag"], "zone-1");
        assert_eq!(vars["start"], "2026-03-01T10:30:15Z");
        assert_eq!(vars["end"], "2026-03-02T10:30:15Z");
    }
}
