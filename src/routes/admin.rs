// ABOUTME: Enterprise-only platform statistics route
// ABOUTME: Reports identity counts per tier, today's usage and stored history volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use volume_core::errors::AppError;

use super::api_key_header;
use crate::models::AdminStats;
use crate::resources::ServerResources;

/// Admin routes
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create `/admin/stats`
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/admin/stats", get(Self::handle_stats))
            .with_state(resources)
    }

    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<AdminStats>, AppError> {
        let stats = resources.gate.admin_stats(api_key_header(&headers)).await?;
        Ok(Json(stats))
    }
}
