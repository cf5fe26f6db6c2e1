// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores, server resources and identity seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `volume_optimizer`

use std::sync::{Arc, Once};

use volume_optimizer::{
    api_keys::ApiKeyManager,
    config::{DatabaseUrl, Environment, ServerConfig, TierLimits},
    database_plugins::{SqliteStore, VolumeStore},
    models::{Identity, Progress, Recovered, Tier, TrainingLevel, TrainingState},
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration pointing at an in-memory database
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database: DatabaseUrl::Memory,
        environment: Environment::Testing,
        ..ServerConfig::default()
    }
}

/// Fresh in-memory SQLite store
pub async fn create_test_store() -> Arc<SqliteStore> {
    init_test_logging();
    Arc::new(SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap())
}

/// Server resources over a fresh in-memory store with default limits
pub async fn create_test_resources() -> Arc<ServerResources> {
    create_test_resources_with_limits(TierLimits::default()).await
}

/// Server resources over a fresh in-memory store with custom limits
pub async fn create_test_resources_with_limits(limits: TierLimits) -> Arc<ServerResources> {
    let store: Arc<dyn VolumeStore> = create_test_store().await;
    let config = ServerConfig {
        tier_limits: limits,
        ..test_config()
    };
    Arc::new(ServerResources::new(config, store).unwrap())
}

/// Insert an identity on `tier` with one active key; returns the full key
pub async fn create_identity_with_key(
    store: &dyn VolumeStore,
    email: &str,
    tier: Tier,
) -> (Identity, String) {
    let identity = Identity::new(email).with_tier(tier);
    store.create_identity(&identity).await.unwrap();

    let (api_key, full_key) = ApiKeyManager::new()
        .create_api_key(identity.id, "test key")
        .unwrap();
    store.create_api_key(&api_key).await.unwrap();

    (identity, full_key)
}

/// Build a training state
pub fn training_state(
    current_sets: u32,
    training_level: TrainingLevel,
    progress: Progress,
    recovered: Recovered,
    muscle_group: &str,
) -> TrainingState {
    TrainingState::new(current_sets, training_level, progress, recovered, muscle_group).unwrap()
}
