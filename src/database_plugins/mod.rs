// ABOUTME: Storage abstraction for identities, API keys, usage events and training history
// ABOUTME: The access gate and account service only ever talk to storage through VolumeStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use volume_core::errors::AppResult;
use volume_core::models::{ApiKey, HistoryRecord, Identity, Tier, UsageEvent};

/// SQLite implementation
pub mod sqlite;

pub use sqlite::SqliteStore;

/// Identity resolved from an active API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyOwner {
    /// Owning identity
    pub identity: Identity,
    /// Key that authenticated
    pub api_key_id: Uuid,
}

/// Core storage abstraction
///
/// Usage events and history records are append-only. Child rows carry the
/// id of their identity; nothing is ever deleted.
#[async_trait]
pub trait VolumeStore: Send + Sync {
    // ================================
    // Identities
    // ================================

    /// Insert a new identity
    async fn create_identity(&self, identity: &Identity) -> AppResult<()>;

    /// Get identity by id
    async fn get_identity(&self, identity_id: Uuid) -> AppResult<Option<Identity>>;

    /// Get identity by email
    async fn get_identity_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Resolve an active API key, by hash, to its identity
    async fn get_identity_by_api_key(&self, key_hash: &str) -> AppResult<Option<ApiKeyOwner>>;

    /// Move an identity to `tier` only if its stored tier ranks lower.
    /// Returns whether a row changed.
    async fn upgrade_tier(&self, identity_id: Uuid, tier: Tier) -> AppResult<bool>;

    /// Number of identities on each tier
    async fn count_identities_by_tier(&self) -> AppResult<BTreeMap<Tier, u64>>;

    // ================================
    // API keys
    // ================================

    /// Insert a new API key
    async fn create_api_key(&self, api_key: &ApiKey) -> AppResult<()>;

    /// All keys owned by an identity, newest first
    async fn list_api_keys(&self, identity_id: Uuid) -> AppResult<Vec<ApiKey>>;

    /// Deactivate a key owned by `identity_id`; false if no such key
    async fn deactivate_api_key(&self, identity_id: Uuid, key_id: Uuid) -> AppResult<bool>;

    /// Record a successful authentication
    async fn touch_api_key(&self, key_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()>;

    // ================================
    // Usage events
    // ================================

    /// Append one admitted request
    async fn append_usage_event(&self, event: &UsageEvent) -> AppResult<()>;

    /// Admitted requests of one identity on one UTC day
    async fn count_usage_today(&self, identity_id: Uuid, day: NaiveDate) -> AppResult<u32>;

    /// Admitted requests of all identities on one UTC day
    async fn count_all_usage_on(&self, day: NaiveDate) -> AppResult<u64>;

    // ================================
    // Training history
    // ================================

    /// Append a history record
    async fn append_history(&self, record: &HistoryRecord) -> AppResult<()>;

    /// History of one identity, newest first, optionally filtered by group
    async fn list_history(
        &self,
        identity_id: Uuid,
        muscle_group: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<Vec<HistoryRecord>>;

    /// Total history records across identities
    async fn count_history(&self) -> AppResult<u64>;
}
