// ABOUTME: Registration, identity summary and API key management routes
// ABOUTME: Key routes authenticate with X-API-Key through the access gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Identity and API key routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;
use volume_core::errors::AppError;

use super::api_key_header;
use crate::api_keys::CreateApiKeyRequest;
use crate::models::{IdentitySummary, RegisterRequest};
use crate::resources::ServerResources;

/// Identity and key routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all identity and key routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/me", get(Self::handle_me))
            .route(
                "/auth/api-keys",
                post(Self::handle_create_api_key).get(Self::handle_list_api_keys),
            )
            .route("/auth/api-keys/:key_id", delete(Self::handle_revoke_api_key))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let response = resources.accounts.register(&request.email).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<IdentitySummary>, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        Ok(Json(IdentitySummary::from(&identity)))
    }

    async fn handle_create_api_key(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<CreateApiKeyRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let response = resources
            .accounts
            .create_key(identity.id, &request.name)
            .await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_list_api_keys(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let keys = resources.accounts.list_keys(identity.id).await?;
        Ok(Json(serde_json::json!({ "api_keys": keys })).into_response())
    }

    async fn handle_revoke_api_key(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(key_id): Path<String>,
    ) -> Result<Response, AppError> {
        let identity = resources.gate.resolve(api_key_header(&headers)).await?;
        let key_id = Uuid::parse_str(&key_id)
            .map_err(|_| AppError::not_found(format!("API key {key_id}")))?;
        resources.accounts.revoke_key(identity.id, key_id).await?;
        Ok(Json(serde_json::json!({ "message": "API key deactivated" })).into_response())
    }
}
