// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Wires configuration, store, tier policy, engine, access gate and account service together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use tracing::info;
use volume_core::errors::AppResult;
use volume_intelligence::{LandmarkCatalog, VolumeRecommendationEngine};

use crate::access_gate::AccessGate;
use crate::accounts::AccountService;
use crate::config::ServerConfig;
use crate::database_plugins::{SqliteStore, VolumeStore};
use crate::tiers::TierPolicy;

/// Everything a request handler needs, built once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Immutable configuration
    pub config: Arc<ServerConfig>,
    /// Storage backend
    pub store: Arc<dyn VolumeStore>,
    /// Landmark catalog
    pub catalog: Arc<LandmarkCatalog>,
    /// Tier-gated operations
    pub gate: AccessGate,
    /// Registration and key management
    pub accounts: AccountService,
}

impl ServerResources {
    /// Build resources over an existing store with the standard catalog
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the tier limits or catalog fail validation
    pub fn new(config: ServerConfig, store: Arc<dyn VolumeStore>) -> AppResult<Self> {
        Self::with_catalog(config, store, LandmarkCatalog::standard()?)
    }

    /// Build resources over an existing store and catalog
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the tier limits or catalog fail validation
    pub fn with_catalog(
        config: ServerConfig,
        store: Arc<dyn VolumeStore>,
        catalog: LandmarkCatalog,
    ) -> AppResult<Self> {
        let catalog = Arc::new(catalog);
        let policy = Arc::new(TierPolicy::new(config.tier_limits, &catalog)?);
        let engine = VolumeRecommendationEngine::new(Arc::clone(&catalog));
        let gate = AccessGate::new(Arc::clone(&store), policy, engine)?;

        info!(
            muscle_groups = catalog.len(),
            "Access gate initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            accounts: AccountService::new(Arc::clone(&store)),
            store,
            catalog,
            gate,
        })
    }

    /// Connect the configured SQLite database and build resources over it
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// `ConfigInvalid` if validation fails
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let store: Arc<dyn VolumeStore> = Arc::new(SqliteStore::connect(&config.database).await?);
        Self::new(config, store)
    }
}
