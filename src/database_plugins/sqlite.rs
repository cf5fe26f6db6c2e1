// ABOUTME: SQLite implementation of VolumeStore backed by a sqlx pool
// ABOUTME: Runs idempotent migrations on connect; in-memory databases use a single shared connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! SQLite database implementation
//!
//! UUIDs are stored as text and timestamps as fixed-width RFC 3339 strings
//! (microsecond precision, `Z` suffix) so lexical order matches time order.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;
use volume_core::errors::{AppError, AppResult};
use volume_core::models::{ApiKey, HistoryRecord, Identity, Tier, UsageEvent};

use super::{ApiKeyOwner, VolumeStore};
use crate::config::DatabaseUrl;

/// Connections kept for file-backed databases
const FILE_POOL_MAX_CONNECTIONS: u32 = 8;

/// SQLite store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the URL is invalid, the file cannot be
    /// created, or a migration fails
    pub async fn connect(database: &DatabaseUrl) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = database {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&database.to_connection_string())
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database.is_memory() {
            // Every in-memory connection is a separate database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database}: {e}")))?;

        let store = Self { pool };
        store.migrate().await?;
        info!("SQLite store ready at {}", database);
        Ok(store)
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS identities (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                tier TEXT NOT NULL,
                tier_rank INTEGER NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS api_keys (
                id TEXT PRIMARY KEY,
                identity_id TEXT NOT NULL REFERENCES identities(id),
                name TEXT NOT NULL,
                key_prefix TEXT NOT NULL,
                key_hash TEXT NOT NULL UNIQUE,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_used_at TEXT
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_api_keys_identity ON api_keys(identity_id)",
            r"
            CREATE TABLE IF NOT EXISTS usage_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                identity_id TEXT NOT NULL REFERENCES identities(id),
                endpoint TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                usage_day TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_usage_events_identity_day ON usage_events(identity_id, usage_day)",
            "CREATE INDEX IF NOT EXISTS idx_usage_events_day ON usage_events(usage_day)",
            r"
            CREATE TABLE IF NOT EXISTS training_history (
                id TEXT PRIMARY KEY,
                identity_id TEXT NOT NULL REFERENCES identities(id),
                muscle_group TEXT NOT NULL,
                current_sets INTEGER NOT NULL,
                recommendation TEXT NOT NULL,
                training_level TEXT NOT NULL,
                progress TEXT NOT NULL,
                recovered TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_training_history_identity_created ON training_history(identity_id, created_at)",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to run migration: {e}")))?;
        }
        debug!("SQLite migrations applied");
        Ok(())
    }

    fn row_to_identity(row: &SqliteRow) -> AppResult<Identity> {
        Ok(Identity {
            id: parse_uuid(&row.try_get::<String, _>("id")?)?,
            email: row.try_get("email")?,
            tier: row.try_get::<String, _>("tier")?.parse()?,
            is_active: row.try_get("is_active")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        })
    }

    fn row_to_api_key(row: &SqliteRow) -> AppResult<ApiKey> {
        Ok(ApiKey {
            id: parse_uuid(&row.try_get::<String, _>("id")?)?,
            identity_id: parse_uuid(&row.try_get::<String, _>("identity_id")?)?,
            name: row.try_get("name")?,
            key_prefix: row.try_get("key_prefix")?,
            key_hash: row.try_get("key_hash")?,
            is_active: row.try_get("is_active")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
            last_used_at: row
                .try_get::<Option<String>, _>("last_used_at")?
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }

    fn row_to_history(row: &SqliteRow) -> AppResult<HistoryRecord> {
        Ok(HistoryRecord {
            id: parse_uuid(&row.try_get::<String, _>("id")?)?,
            identity_id: parse_uuid(&row.try_get::<String, _>("identity_id")?)?,
            muscle_group: row.try_get("muscle_group")?,
            current_sets: u32::try_from(row.try_get::<i64, _>("current_sets")?).map_err(|e| {
                AppError::internal(format!("Integer conversion failed for current_sets: {e}"))
            })?,
            recommendation: row.try_get("recommendation")?,
            training_level: row.try_get::<String, _>("training_level")?.parse()?,
            progress: row.try_get::<String, _>("progress")?.parse()?,
            recovered: row.try_get::<String, _>("recovered")?.parse()?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        })
    }
}

#[async_trait]
impl VolumeStore for SqliteStore {
    async fn create_identity(&self, identity: &Identity) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO identities (id, email, tier, tier_rank, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(identity.id.to_string())
        .bind(&identity.email)
        .bind(identity.tier.as_str())
        .bind(i64::from(identity.tier.rank()))
        .bind(identity.is_active)
        .bind(format_timestamp(identity.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::already_exists(
                format!("Identity with email {} already exists", identity.email),
            ),
            other => AppError::database(format!("Failed to create identity: {other}")),
        })?;
        Ok(())
    }

    async fn get_identity(&self, identity_id: Uuid) -> AppResult<Option<Identity>> {
        let row = sqlx::query("SELECT * FROM identities WHERE id = $1")
            .bind(identity_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get identity: {e}")))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn get_identity_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let row = sqlx::query("SELECT * FROM identities WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get identity by email: {e}")))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn get_identity_by_api_key(&self, key_hash: &str) -> AppResult<Option<ApiKeyOwner>> {
        let row = sqlx::query(
            r"
            SELECT i.*, k.id AS api_key_id
            FROM api_keys k
            JOIN identities i ON i.id = k.identity_id
            WHERE k.key_hash = $1 AND k.is_active = 1
            ",
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to resolve API key: {e}")))?;

        row.as_ref()
            .map(|row| {
                Ok(ApiKeyOwner {
                    identity: Self::row_to_identity(row)?,
                    api_key_id: parse_uuid(&row.try_get::<String, _>("api_key_id")?)?,
                })
            })
            .transpose()
    }

    async fn upgrade_tier(&self, identity_id: Uuid, tier: Tier) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE identities
            SET tier = $1, tier_rank = $2
            WHERE id = $3 AND tier_rank < $4
            ",
        )
        .bind(tier.as_str())
        .bind(i64::from(tier.rank()))
        .bind(identity_id.to_string())
        .bind(i64::from(tier.rank()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upgrade tier: {e}")))?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_identities_by_tier(&self) -> AppResult<BTreeMap<Tier, u64>> {
        let rows = sqlx::query("SELECT tier, COUNT(*) AS count FROM identities GROUP BY tier")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count identities: {e}")))?;

        let mut counts: BTreeMap<Tier, u64> = Tier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for row in &rows {
            let tier: Tier = row.try_get::<String, _>("tier")?.parse()?;
            counts.insert(tier, count_to_u64(row.try_get("count")?)?);
        }
        Ok(counts)
    }

    async fn create_api_key(&self, api_key: &ApiKey) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO api_keys (
                id, identity_id, name, key_prefix, key_hash, is_active, created_at, last_used_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(api_key.id.to_string())
        .bind(api_key.identity_id.to_string())
        .bind(&api_key.name)
        .bind(&api_key.key_prefix)
        .bind(&api_key.key_hash)
        .bind(api_key.is_active)
        .bind(format_timestamp(api_key.created_at))
        .bind(api_key.last_used_at.map(format_timestamp))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create API key: {e}")))?;
        Ok(())
    }

    async fn list_api_keys(&self, identity_id: Uuid) -> AppResult<Vec<ApiKey>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM api_keys
            WHERE identity_id = $1
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(identity_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list API keys: {e}")))?;

        rows.iter().map(Self::row_to_api_key).collect()
    }

    async fn deactivate_api_key(&self, identity_id: Uuid, key_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE api_keys
            SET is_active = 0
            WHERE id = $1 AND identity_id = $2
            ",
        )
        .bind(key_id.to_string())
        .bind(identity_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to deactivate API key: {e}")))?;

        Ok(result.rows_affected() == 1)
    }

    async fn touch_api_key(&self, key_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE api_keys SET last_used_at = $1 WHERE id = $2")
            .bind(format_timestamp(used_at))
            .bind(key_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update API key last used: {e}")))?;
        Ok(())
    }

    async fn append_usage_event(&self, event: &UsageEvent) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO usage_events (identity_id, endpoint, timestamp, usage_day)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(event.identity_id.to_string())
        .bind(&event.endpoint)
        .bind(format_timestamp(event.timestamp))
        .bind(event.usage_day().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record usage event: {e}")))?;
        Ok(())
    }

    async fn count_usage_today(&self, identity_id: Uuid, day: NaiveDate) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM usage_events WHERE identity_id = $1 AND usage_day = $2",
        )
        .bind(identity_id.to_string())
        .bind(day.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count usage: {e}")))?;

        u32::try_from(count)
            .map_err(|e| AppError::internal(format!("Integer conversion failed for usage count: {e}")))
    }

    async fn count_all_usage_on(&self, day: NaiveDate) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usage_events WHERE usage_day = $1")
            .bind(day.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count daily usage: {e}")))?;

        count_to_u64(count)
    }

    async fn append_history(&self, record: &HistoryRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO training_history (
                id, identity_id, muscle_group, current_sets, recommendation,
                training_level, progress, recovered, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.identity_id.to_string())
        .bind(&record.muscle_group)
        .bind(i64::from(record.current_sets))
        .bind(&record.recommendation)
        .bind(record.training_level.as_str())
        .bind(record.progress.as_str())
        .bind(record.recovered.as_str())
        .bind(format_timestamp(record.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store history record: {e}")))?;
        Ok(())
    }

    async fn list_history(
        &self,
        identity_id: Uuid,
        muscle_group: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<Vec<HistoryRecord>> {
        // SQLite treats a negative LIMIT as unbounded
        let rows = sqlx::query(
            r"
            SELECT * FROM training_history
            WHERE identity_id = $1 AND ($2 IS NULL OR muscle_group = $3)
            ORDER BY created_at DESC, rowid DESC
            LIMIT $4
            ",
        )
        .bind(identity_id.to_string())
        .bind(muscle_group)
        .bind(muscle_group)
        .bind(limit.map_or(-1, i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list history: {e}")))?;

        rows.iter().map(Self::row_to_history).collect()
    }

    async fn count_history(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training_history")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count history: {e}")))?;

        count_to_u64(count)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Failed to parse timestamp '{raw}': {e}")))
}

fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::internal(format!("Failed to parse UUID '{raw}': {e}")))
}

fn count_to_u64(count: i64) -> AppResult<u64> {
    u64::try_from(count)
        .map_err(|e| AppError::internal(format!("Integer conversion failed for count: {e}")))
}
