// ABOUTME: Per-identity daily quota enforcement with atomic check-and-record
// ABOUTME: Serializes each identity's requests per UTC day behind a DashMap of async mutexes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Daily Quota Tracking
//!
//! Today's count is derived from stored usage events dated today (UTC), so
//! the quota resets at midnight without any reset job.
//!
//! For one `(identity, day)` the count read and the event append run under
//! the same async mutex, so two concurrent requests never observe the same
//! pre-increment count. The append is the only write: a request cancelled
//! before it leaves nothing behind, and a denied request appends nothing.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;
use volume_core::errors::AppResult;
use volume_core::models::{Identity, Tier, UsageEvent};

use crate::database_plugins::VolumeStore;
use crate::tiers::TierPolicy;

/// Guard count above which stale guards are pruned, at most once per UTC day
const DEFAULT_CLEANUP_THRESHOLD: usize = 1_024;

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Request counted; `count` includes it
    Admitted {
        /// Requests admitted today including this one
        count: u32,
        /// Daily quota
        limit: u32,
    },
    /// Quota exhausted; nothing recorded
    Denied {
        /// Requests admitted today
        current_count: u32,
        /// Daily quota
        limit: u32,
    },
}

impl QuotaDecision {
    /// Whether the request may proceed
    #[must_use]
    pub const fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

/// Quota state reported to clients in response headers
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Tier the quota belongs to
    pub tier: Tier,
    /// Daily quota
    pub limit: u32,
    /// Requests left today
    pub remaining: u32,
    /// Next UTC midnight
    pub reset_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Build from an admitted count
    #[must_use]
    pub fn new(tier: Tier, count: u32, limit: u32, now: DateTime<Utc>) -> Self {
        Self {
            tier,
            limit,
            remaining: limit.saturating_sub(count),
            reset_at: next_utc_midnight(now),
        }
    }
}

/// Start of the UTC day after `now`
#[must_use]
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map_or(now, |midnight| midnight.and_utc())
}

/// Per-identity, per-day usage counter
#[derive(Clone)]
pub struct QuotaTracker {
    store: Arc<dyn VolumeStore>,
    policy: Arc<TierPolicy>,
    guards: Arc<DashMap<(Uuid, NaiveDate), Arc<Mutex<()>>>>,
    cleanup_threshold: usize,
    // Days since CE of the last prune
    last_pruned_day: Arc<AtomicI32>,
}

impl QuotaTracker {
    /// Create a tracker over the given store and policy
    #[must_use]
    pub fn new(store: Arc<dyn VolumeStore>, policy: Arc<TierPolicy>) -> Self {
        Self {
            store,
            policy,
            guards: Arc::new(DashMap::new()),
            cleanup_threshold: DEFAULT_CLEANUP_THRESHOLD,
            last_pruned_day: Arc::new(AtomicI32::new(i32::MIN)),
        }
    }

    /// Override the guard count that triggers pruning
    #[must_use]
    pub const fn with_cleanup_threshold(mut self, cleanup_threshold: usize) -> Self {
        self.cleanup_threshold = cleanup_threshold;
        self
    }

    /// Admit the request and record it, or deny it without recording
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the count or append fails; no event is
    /// recorded in that case
    pub async fn check_and_record(
        &self,
        identity: &Identity,
        endpoint: &str,
        now: DateTime<Utc>,
    ) -> AppResult<QuotaDecision> {
        let today = now.date_naive();
        let limit = self.policy.daily_limit(identity.tier);

        let guard = {
            let entry = self
                .guards
                .entry((identity.id, today))
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };

        if self.guards.len() > self.cleanup_threshold && self.claim_prune(today) {
            self.prune_stale_guards(today);
        }

        let _lock = guard.lock().await;

        let current_count = self.store.count_usage_today(identity.id, today).await?;
        if current_count >= limit {
            info!(
                identity_id = %identity.id,
                tier = %identity.tier,
                limit,
                current_count,
                "Daily quota exhausted"
            );
            return Ok(QuotaDecision::Denied {
                current_count,
                limit,
            });
        }

        self.store
            .append_usage_event(&UsageEvent::new(identity.id, endpoint, now))
            .await?;

        Ok(QuotaDecision::Admitted {
            count: current_count + 1,
            limit,
        })
    }

    /// Requests admitted today; read-only and unguarded
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the count fails
    pub async fn usage_today(&self, identity_id: Uuid, now: DateTime<Utc>) -> AppResult<u32> {
        self.store
            .count_usage_today(identity_id, now.date_naive())
            .await
    }

    /// Number of guards currently held in the map
    #[must_use]
    pub fn tracked_guards(&self) -> usize {
        self.guards.len()
    }

    /// Whether this caller is the first to prune on `today`
    fn claim_prune(&self, today: NaiveDate) -> bool {
        let day = today.num_days_from_ce();
        self.last_pruned_day.fetch_max(day, Ordering::AcqRel) < day
    }

    /// Drop guards for past days that no task holds
    fn prune_stale_guards(&self, today: NaiveDate) {
        let before = self.guards.len();
        self.guards
            .retain(|(_, day), guard| *day >= today || Arc::strong_count(guard) > 1);
        debug!(
            removed = before.saturating_sub(self.guards.len()),
            "Pruned stale quota guards"
        );
    }
}
