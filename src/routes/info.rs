// ABOUTME: Public service information and landmark catalog routes
// ABOUTME: Serves the pricing table and the full muscle group landmark table without authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use volume_core::constants::service_names;
use volume_core::models::Tier;

use crate::resources::ServerResources;

/// Service info routes
pub struct InfoRoutes;

impl InfoRoutes {
    /// Create `/` and `/muscle-groups`
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/muscle-groups", get(Self::handle_muscle_groups))
            .with_state(resources)
    }

    async fn handle_root(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let pricing: serde_json::Map<String, Value> = Tier::ALL
            .iter()
            .map(|tier| {
                (
                    tier.as_str().to_owned(),
                    json!({
                        "price_monthly": resources.config.pricing.monthly_dollars(*tier),
                        "daily_limit": resources.gate.policy().daily_limit(*tier),
                        "muscle_groups": resources.gate.policy().visible_muscle_groups(*tier),
                    }),
                )
            })
            .collect();

        Json(json!({
            "service": service_names::VOLUME_OPTIMIZER,
            "version": env!("CARGO_PKG_VERSION"),
            "pricing": pricing,
        }))
    }

    async fn handle_muscle_groups(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "muscle_groups": resources.catalog.muscle_groups(),
            "landmarks": resources.catalog.table(),
        }))
    }
}
