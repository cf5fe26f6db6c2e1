// ABOUTME: Quota-counted training routes: recommendation, history and analytics
// ABOUTME: Admitted responses carry X-RateLimit-* headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use volume_core::errors::AppError;

use super::{api_key_header, metered_json};
use crate::models::{HistoryQuery, VolumeRequest};
use crate::resources::ServerResources;

/// Training routes
pub struct VolumeRoutes;

impl VolumeRoutes {
    /// Create the `/v1` routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/v1/predict-volume", post(Self::handle_predict_volume))
            .route("/v1/history", get(Self::handle_history))
            .route("/v1/analytics", get(Self::handle_analytics))
            .with_state(resources)
    }

    async fn handle_predict_volume(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<VolumeRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let state = request.into_state()?;
        let metered = resources
            .gate
            .recommend_for(&identity, state, Utc::now())
            .await?;
        Ok(metered_json(metered))
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<HistoryQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let Query(query) = query.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let metered = resources
            .gate
            .history_for(&identity, query.muscle_group.as_deref(), query.limit)
            .await?;
        Ok(metered_json(metered))
    }

    async fn handle_analytics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let metered = resources.gate.analytics(api_key_header(&headers)).await?;
        Ok(metered_json(metered))
    }
}
