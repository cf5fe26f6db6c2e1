// ABOUTME: HTTP route tests driving the full axum router with in-memory resources
// ABOUTME: Verifies status codes, JSON error bodies and rate limit headers end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use volume_optimizer::routes::build_router;

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn router() -> Router {
    build_router(common::create_test_resources().await)
}

async fn register(router: &Router, email: &str) -> String {
    let response = send(
        router,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": email })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["api_key"].as_str().unwrap().to_owned()
}

fn chest_request() -> Value {
    json!({
        "current_sets": 6,
        "training_level": "beginner",
        "progress": "no",
        "recovered": "yes"
    })
}

#[tokio::test]
async fn test_health() {
    let router = router().await;
    let response = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn test_root_lists_pricing() {
    let router = router().await;
    let response = send(&router, Method::GET, "/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["service"], "volume-optimizer");
    let pricing = &response.body["pricing"];
    assert_eq!(pricing["free"]["daily_limit"], 100);
    assert_eq!(pricing["free"]["muscle_groups"], json!(["chest"]));
    assert_eq!(pricing["pro"]["daily_limit"], 10_000);
    assert_eq!(pricing["pro"]["price_monthly"], 19.0);
    assert_eq!(pricing["enterprise"]["price_monthly"], 199.0);
    assert_eq!(pricing["enterprise"]["muscle_groups"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_muscle_groups_catalog() {
    let router = router().await;
    let response = send(&router, Method::GET, "/muscle-groups", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["muscle_groups"].as_array().unwrap().len(), 10);
    assert_eq!(
        response.body["landmarks"]["chest"]["beginner"],
        json!({ "MEV": 8, "MAV": 12, "MRV": 16 })
    );
}

#[tokio::test]
async fn test_register_then_predict_with_rate_limit_headers() {
    let router = router().await;
    let key = register(&router, "lifter@example.com").await;

    let response = send(
        &router,
        Method::POST,
        "/v1/predict-volume",
        Some(&key),
        Some(chest_request()),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["volume_prediction"], "increase to at least 8");
    assert_eq!(response.body["muscle_group"], "chest");
    assert_eq!(response.body["current_sets"], 6);
    assert!(response.body.get("landmarks").is_none());

    assert_eq!(response.headers["x-ratelimit-limit"], "100");
    assert_eq!(response.headers["x-ratelimit-remaining"], "99");
    assert_eq!(response.headers["x-ratelimit-tier"], "free");
    assert!(response.headers.contains_key("x-ratelimit-reset"));
}

#[tokio::test]
async fn test_missing_key_is_unauthorized() {
    let router = router().await;
    let response = send(
        &router,
        Method::POST,
        "/v1/predict-volume",
        None,
        Some(chest_request()),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_free_tier_forbidden_group_returns_403() {
    let router = router().await;
    let key = register(&router, "free@example.com").await;

    let mut body = chest_request();
    body["muscle_group"] = json!("back");
    let response = send(&router, Method::POST, "/v1/predict-volume", Some(&key), Some(body)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"]["code"], "MUSCLE_GROUP_FORBIDDEN");
    assert_eq!(
        response.body["error"]["details"]["available_muscle_groups"],
        json!(["chest"])
    );
}

#[tokio::test]
async fn test_upgrade_unlocks_landmarks() {
    let router = router().await;
    let key = register(&router, "climber@example.com").await;

    let response = send(
        &router,
        Method::POST,
        "/subscription/upgrade",
        Some(&key),
        Some(json!({ "tier": "pro" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["new_tier"], "pro");

    let mut body = chest_request();
    body["muscle_group"] = json!("back");
    let response = send(&router, Method::POST, "/v1/predict-volume", Some(&key), Some(body)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["landmarks"],
        json!({ "MEV": 10, "MAV": 14, "MRV": 18 })
    );
    assert_eq!(response.headers["x-ratelimit-tier"], "pro");

    let response = send(
        &router,
        Method::POST,
        "/subscription/upgrade",
        Some(&key),
        Some(json!({ "tier": "free" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "DOWNGRADE_REJECTED");
}

#[tokio::test]
async fn test_subscription_info() {
    let router = router().await;
    let key = register(&router, "info@example.com").await;

    let response = send(&router, Method::GET, "/subscription/info", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tier"], "free");
    assert_eq!(response.body["daily_limit"], 100);
    assert_eq!(response.body["usage_today"], 0);
}

#[tokio::test]
async fn test_history_and_admin_gated_by_tier() {
    let router = router().await;
    let key = register(&router, "gated@example.com").await;

    let response = send(&router, Method::GET, "/v1/history", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"]["code"], "TIER_REQUIRED");

    let response = send(&router, Method::GET, "/v1/analytics", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&router, Method::GET, "/admin/stats", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_history_for_pro_tier() {
    let router = router().await;
    let key = register(&router, "pro@example.com").await;
    send(
        &router,
        Method::POST,
        "/subscription/upgrade",
        Some(&key),
        Some(json!({ "tier": "pro" })),
    )
    .await;
    send(&router, Method::POST, "/v1/predict-volume", Some(&key), Some(chest_request())).await;

    let response = send(
        &router,
        Method::GET,
        "/v1/history?muscle_group=chest&limit=10",
        Some(&key),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 1);
    assert_eq!(
        response.body["history"][0]["recommendation"],
        "increase to at least 8"
    );
    assert_eq!(response.headers["x-ratelimit-remaining"], "9998");

    let response = send(&router, Method::GET, "/v1/analytics", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_workouts_logged"], 1);
}

#[tokio::test]
async fn test_invalid_bodies_are_bad_requests() {
    let router = router().await;
    let key = register(&router, "sloppy@example.com").await;

    let mut zero_sets = chest_request();
    zero_sets["current_sets"] = json!(0);
    let mut negative_sets = chest_request();
    negative_sets["current_sets"] = json!(-3);
    let mut bad_level = chest_request();
    bad_level["training_level"] = json!("elite");

    for body in [zero_sets, negative_sets, bad_level, json!({})] {
        let response =
            send(&router, Method::POST, "/v1/predict-volume", Some(&key), Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["code"], "INVALID_INPUT");
    }

    let response = send(&router, Method::GET, "/subscription/info", Some(&key), None).await;
    assert_eq!(response.body["usage_today"], 0);
}

#[tokio::test]
async fn test_api_key_management() {
    let router = router().await;
    let key = register(&router, "keys@example.com").await;

    let response = send(
        &router,
        Method::POST,
        "/auth/api-keys",
        Some(&key),
        Some(json!({ "name": "laptop" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let new_key = response.body["api_key"].as_str().unwrap().to_owned();
    let new_key_id = response.body["id"].as_str().unwrap().to_owned();

    let response = send(&router, Method::GET, "/auth/api-keys", Some(&new_key), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["api_keys"].as_array().unwrap().len(), 2);

    let response = send(
        &router,
        Method::DELETE,
        &format!("/auth/api-keys/{new_key_id}"),
        Some(&key),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(&router, Method::GET, "/auth/me", Some(&new_key), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = send(&router, Method::GET, "/auth/me", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "keys@example.com");

    for key_id in ["not-a-uuid", "00000000-0000-0000-0000-000000000000"] {
        let response = send(
            &router,
            Method::DELETE,
            &format!("/auth/api-keys/{key_id}"),
            Some(&key),
            None,
        )
        .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"]["code"], "RESOURCE_NOT_FOUND");
    }
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let router = router().await;
    register(&router, "twice@example.com").await;

    let response = send(
        &router,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "twice@example.com" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_credential_checked_before_body() {
    let router = router().await;

    let mut zero_sets = chest_request();
    zero_sets["current_sets"] = json!(0);
    let response = send(&router, Method::POST, "/v1/predict-volume", None, Some(zero_sets)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_CREDENTIAL");

    let response = send(
        &router,
        Method::POST,
        "/subscription/upgrade",
        Some("garbage"),
        Some(json!({ "tier": "platinum" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_CREDENTIAL");

    let response = send(&router, Method::GET, "/v1/history?limit=many", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_bad_upgrade_body_with_valid_key_is_bad_request() {
    let router = router().await;
    let key = register(&router, "platinum@example.com").await;

    let response = send(
        &router,
        Method::POST,
        "/subscription/upgrade",
        Some(&key),
        Some(json!({ "tier": "platinum" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "INVALID_INPUT");
}
