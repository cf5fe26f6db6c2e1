// ABOUTME: Subscription routes: current tier/quota and upgrade-only tier changes
// ABOUTME: Upgrades succeed without any payment step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use volume_core::errors::AppError;

use super::api_key_header;
use crate::models::{SubscriptionInfo, UpgradeRequest, UpgradeResponse};
use crate::resources::ServerResources;

/// Subscription routes
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create `/subscription/info` and `/subscription/upgrade`
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/subscription/info", get(Self::handle_info))
            .route("/subscription/upgrade", post(Self::handle_upgrade))
            .with_state(resources)
    }

    async fn handle_info(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SubscriptionInfo>, AppError> {
        let info = resources
            .gate
            .subscription_info(api_key_header(&headers))
            .await?;
        Ok(Json(info))
    }

    async fn handle_upgrade(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<UpgradeRequest>, JsonRejection>,
    ) -> Result<Json<UpgradeResponse>, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let response = resources.gate.upgrade_for(&identity, request.tier).await?;
        Ok(Json(response))
    }
}
