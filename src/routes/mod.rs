// ABOUTME: Route module organization for the volume optimizer HTTP API
// ABOUTME: Assembles per-area route structs into one router with CORS, tracing and timeout layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Route module for the volume optimizer
//!
//! Each area contains only route definitions and thin handlers that
//! delegate to [`crate::access_gate::AccessGate`] or
//! [`crate::accounts::AccountService`].

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use volume_core::constants::headers as header_names;

use crate::access_gate::MeteredResponse;
use crate::middleware::create_rate_limit_headers;
use crate::resources::ServerResources;

/// Enterprise statistics routes
pub mod admin;
/// Registration and API key routes
pub mod auth;
/// Health check routes
pub mod health;
/// Service info and catalog routes
pub mod info;
/// Subscription info and upgrade routes
pub mod subscription;
/// Recommendation, history and analytics routes
pub mod volume;

pub use admin::AdminRoutes;
pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use info::InfoRoutes;
pub use subscription::SubscriptionRoutes;
pub use volume::VolumeRoutes;

/// Build the full application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(InfoRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(VolumeRoutes::routes(Arc::clone(&resources)))
        .merge(SubscriptionRoutes::routes(Arc::clone(&resources)))
        .merge(AdminRoutes::routes(resources))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Credential from the `X-API-Key` header
pub(crate) fn api_key_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header_names::API_KEY)
        .and_then(|value| value.to_str().ok())
}

/// JSON body plus rate limit headers
pub(crate) fn metered_json<T: Serialize>(metered: MeteredResponse<T>) -> Response {
    (
        create_rate_limit_headers(&metered.rate_limit),
        Json(metered.body),
    )
        .into_response()
}
