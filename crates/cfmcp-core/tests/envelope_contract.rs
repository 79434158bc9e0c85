//! Contract Test: Response Envelope
//!
//! Every tool returns exactly one of two shapes, whatever happens upstream:
//!
//! - `{"status":"success","data":<view>,"message":""}`
//! - `{"status":"error","data":null,"message":<non-empty>}`
//!
//! Constraints verified:
//! - Upstream errors never escape as anything but an error envelope
//! - Missing credentials fail before any transport is built
//! - Error messages follow the fixed per-kind catalogue
//! - Identical upstream state yields byte-identical output on repeat reads

mod common;

use cfmcp_core::error::Error;
use cfmcp_core::{Credentials, Status};
use common::*;
use serde_json::json;

fn assert_error_shape(value: &serde_json::Value) {
    assert_eq!(value["status"], "error");
    assert!(value["data"].is_null());
    assert!(!value["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn success_envelope_carries_view_and_empty_message() {
    let transport = MockTransport::new().on(
        "GET",
        "/zones",
        page(
            json!([{"id": "z1", "name": "example.com", "status": "active", "plan": {"name": "Free Website"}}]),
            1,
            1,
        ),
    );
    let (tools, _) = service(&transport);

    let env = tools.list_zones().await;
    assert_eq!(env.status, Status::Success);
    assert_eq!(
        parse(&env),
        json!({
            "status": "success",
            "data": [{"id": "z1", "name": "example.com", "status": "active", "plan": "Free Website"}],
            "message": "",
        })
    );
}

#[tokio::test]
async fn missing_credentials_never_reach_transport() {
    let transport = MockTransport::new();
    let (tools, factory) = service_with(Credentials::default(), &transport);

    let value = parse(&tools.list_dns_records("z1").await);
    assert_error_shape(&value);
    assert!(value["message"].as_str().unwrap().contains("CF_API_TOKEN"));
    assert!(factory.connects().is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn authentication_failure_uses_fixed_message() {
    let transport = MockTransport::new().fail("GET", "/zones", || {
        Error::auth("10000: Authentication error")
    });
    let (tools, _) = service(&transport);

    let value = parse(&tools.list_zones().await);
    assert_error_shape(&value);
    assert_eq!(
        value["message"],
        "Invalid CF_API_TOKEN, check that the credential is correct"
    );
}

#[tokio::test]
async fn zone_not_found_names_the_zone() {
    let transport = MockTransport::new().fail("GET", "/zones/nope/settings", || {
        Error::not_found("7003: Could not route")
    });
    let (tools, _) = service(&transport);

    let value = parse(&tools.get_zone_settings("nope").await);
    assert_error_shape(&value);
    assert_eq!(value["message"], "Zone nope does not exist");
}

#[tokio::test]
async fn connection_failure_carries_detail() {
    let transport = MockTransport::new().fail("GET", "/zones/z1/dnssec", || {
        Error::connection("dns error: failed to lookup address")
    });
    let (tools, _) = service(&transport);

    let value = parse(&tools.get_dnssec("z1").await);
    assert_error_shape(&value);
    assert_eq!(
        value["message"],
        "Failed to connect to Cloudflare API: dns error: failed to lookup address"
    );
}

#[tokio::test]
async fn other_errors_surface_verbatim() {
    let transport = MockTransport::new().fail("GET", "/zones/z1/ssl/universal/settings", || {
        Error::api(500, "internal")
    });
    let (tools, _) = service(&transport);

    let value = parse(&tools.get_ssl_settings("z1").await);
    assert_error_shape(&value);
    assert_eq!(value["message"], "Cloudflare API error (500): internal");
}

#[tokio::test]
async fn non_ascii_text_is_not_escaped() {
    let transport = MockTransport::new().on(
        "GET",
        "/zones/z1/email/routing/rules",
        page(json!([{"id": "r1", "name": "转发规则", "enabled": true, "priority": 0}]), 1, 1),
    );
    let (tools, _) = service(&transport);

    let text = tools.list_email_routing_rules("z1").await.to_json();
    assert!(text.contains("转发规则"));
    assert!(!text.contains("\\u"));
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let transport = MockTransport::new()
        .on(
            "GET",
            "/zones/z1/dnssec",
            ok(json!({"status": "active", "ds": "example.com. 3600 IN DS 2371 13 2 1F98", "algorithm": "13", "digest_type": "2"})),
        )
        .on(
            "GET",
            "/zones/z1/settings",
            ok(json!([
                {"id": "ssl", "value": "full"},
                {"id": "brotli", "value": "on"},
                {"id": "cache_level", "value": "aggressive"},
                {"id": "min_tls_version", "value": "1.2"},
            ])),
        );
    let (tools, _) = service(&transport);

    let first = tools.get_dnssec("z1").await.to_json();
    let second = tools.get_dnssec("z1").await.to_json();
    assert_eq!(first, second);

    let first = tools.get_zone_settings("z1").await.to_json();
    let second = tools.get_zone_settings("z1").await.to_json();
    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test]
async fn dnssec_view_drops_extra_fields() {
    let transport = MockTransport::new().on(
        "GET",
        "/zones/z1/dnssec",
        ok(json!({
            "status": "active",
            "ds": "x",
            "algorithm": "13",
            "digest_type": "2",
            "flags": 257,
            "public_key": "mdsswUyr3DPW132mOi8V9xESWE8jTo0dxCjjnopKl+GqJxpVXckHAeF+KkxLbxILfDLUT0rAK9iUzy1L53eKGQ==",
        })),
    );
    let (tools, _) = service(&transport);

    let env = tools.get_dnssec("z1").await;
    assert_eq!(
        parse(&env),
        json!({
            "status": "success",
            "data": {"status": "active", "ds": "x", "algorithm": "13", "digest_type": "2"},
            "message": "",
        })
    );
}
