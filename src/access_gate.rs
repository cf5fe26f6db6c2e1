// ABOUTME: Request orchestration: resolve credential, authorize, meter quota, compute, persist
// ABOUTME: Every tier-gated operation of the API goes through AccessGate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Access Gate
//!
//! A recommendation request moves through
//! `Resolving → Authorizing → QuotaChecking → Computing → Persisting → Responding`.
//! Each stage either advances or fails with the error for that stage; a
//! failure before `QuotaChecking` leaves no usage event behind.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use volume_core::constants::{endpoints, limits};
use volume_core::errors::{AppError, AppResult, ErrorCode};
use volume_core::models::{HistoryRecord, Identity, Tier, TrainingLevel, TrainingState};
use volume_intelligence::{TrainingAnalytics, VolumeRecommendationEngine};

use crate::api_keys::ApiKeyManager;
use crate::database_plugins::{ApiKeyOwner, VolumeStore};
use crate::models::{
    AdminStats, HistoryResponse, SubscriptionInfo, UpgradeResponse, VolumeResponse,
};
use crate::rate_limiting::{QuotaDecision, QuotaTracker, RateLimitInfo};
use crate::tiers::TierPolicy;

/// A quota-counted result together with the caller's remaining quota
#[derive(Debug, Clone)]
pub struct MeteredResponse<T> {
    /// Response body
    pub body: T,
    /// Quota state after this request
    pub rate_limit: RateLimitInfo,
}

/// Orchestrates tier checks, quota and the recommendation engine
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn VolumeStore>,
    policy: Arc<TierPolicy>,
    quota: QuotaTracker,
    engine: VolumeRecommendationEngine,
    key_manager: ApiKeyManager,
}

impl AccessGate {
    /// Build the gate, checking that every visible group has landmarks
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a group visible to any tier is missing a
    /// landmark entry for some training level
    pub fn new(
        store: Arc<dyn VolumeStore>,
        policy: Arc<TierPolicy>,
        engine: VolumeRecommendationEngine,
    ) -> AppResult<Self> {
        for group in policy.all_visible_groups() {
            for level in TrainingLevel::ALL {
                if engine.catalog().get(group, level).is_none() {
                    return Err(AppError::config(format!(
                        "muscle group '{group}' is visible but has no {level} landmarks"
                    )));
                }
            }
        }

        Ok(Self {
            quota: QuotaTracker::new(Arc::clone(&store), Arc::clone(&policy)),
            store,
            policy,
            engine,
            key_manager: ApiKeyManager::new(),
        })
    }

    /// Replace the quota tracker, keeping everything else
    #[must_use]
    pub fn with_quota_tracker(mut self, quota: QuotaTracker) -> Self {
        self.quota = quota;
        self
    }

    /// Tier policy in effect
    #[must_use]
    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Recommendation engine in effect
    #[must_use]
    pub const fn engine(&self) -> &VolumeRecommendationEngine {
        &self.engine
    }

    /// Quota tracker in effect
    #[must_use]
    pub const fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    /// Map a credential to an active identity
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if the credential is missing, malformed,
    /// unknown, deactivated, or belongs to an inactive identity
    pub async fn resolve(&self, credential: Option<&str>) -> AppResult<Identity> {
        let credential = credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::invalid_credential("Missing API key"))?;
        self.key_manager.validate_key_format(credential)?;

        let key_hash = self.key_manager.hash_key(credential);
        let Some(ApiKeyOwner {
            identity,
            api_key_id,
        }) = self.store.get_identity_by_api_key(&key_hash).await?
        else {
            return Err(AppError::invalid_credential("Invalid API key"));
        };

        if !identity.is_active {
            return Err(AppError::invalid_credential("Account is inactive"));
        }

        if let Err(e) = self.store.touch_api_key(api_key_id, Utc::now()).await {
            warn!(api_key_id = %api_key_id, "Failed to update API key last used: {e}");
        }

        Ok(identity)
    }

    /// Recommend a weekly volume adjustment
    ///
    /// # Errors
    ///
    /// See [`AccessGate::recommend_at`]
    pub async fn recommend(
        &self,
        credential: Option<&str>,
        state: TrainingState,
    ) -> AppResult<MeteredResponse<VolumeResponse>> {
        self.recommend_at(credential, state, Utc::now()).await
    }

    /// Recommend a weekly volume adjustment as of `now`
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential`, `MuscleGroupForbidden`,
    /// `RateLimitExceeded` or `UnknownMuscleGroup` for the stage that
    /// rejected the request, or `DatabaseError` if the quota store fails
    pub async fn recommend_at(
        &self,
        credential: Option<&str>,
        state: TrainingState,
        now: DateTime<Utc>,
    ) -> AppResult<MeteredResponse<VolumeResponse>> {
        let identity = self.resolve(credential).await?;
        self.recommend_for(&identity, state, now).await
    }

    /// Recommend for an already resolved identity, starting at authorization
    ///
    /// # Errors
    ///
    /// Returns `MuscleGroupForbidden`, `RateLimitExceeded` or
    /// `UnknownMuscleGroup` for the stage that rejected the request, or
    /// `DatabaseError` if the quota store fails
    pub async fn recommend_for(
        &self,
        identity: &Identity,
        state: TrainingState,
        now: DateTime<Utc>,
    ) -> AppResult<MeteredResponse<VolumeResponse>> {
        if !self.policy.is_visible(identity.tier, &state.muscle_group) {
            return Err(AppError::muscle_group_forbidden(
                &state.muscle_group,
                self.policy.visible_muscle_groups(identity.tier),
            ));
        }

        let rate_limit = self
            .admit(identity, endpoints::PREDICT_VOLUME, now)
            .await?;

        let recommendation = self.engine.recommend(&state).map_err(|e| {
            if e.code == ErrorCode::UnknownMuscleGroup {
                error!(
                    muscle_group = %state.muscle_group,
                    tier = %identity.tier,
                    "Authorized muscle group missing from landmark catalog"
                );
            }
            e
        })?;
        let text = recommendation.text();

        if identity.tier.is_paid() {
            let record = HistoryRecord::from_state(identity.id, &state, text.clone(), now);
            if let Err(e) = self.store.append_history(&record).await {
                warn!(identity_id = %identity.id, "Failed to store training history: {e}");
            }
        }

        Ok(MeteredResponse {
            body: VolumeResponse {
                volume_prediction: text,
                current_sets: state.current_sets,
                muscle_group: state.muscle_group,
                training_level: state.training_level,
                landmarks: identity.tier.is_paid().then_some(recommendation.landmarks),
            },
            rate_limit,
        })
    }

    /// Move the caller to a strictly higher tier
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` or `DowngradeRejected`; a concurrent
    /// upgrade that already reached `requested` also yields `DowngradeRejected`
    pub async fn upgrade_tier(
        &self,
        credential: Option<&str>,
        requested: Tier,
    ) -> AppResult<UpgradeResponse> {
        let identity = self.resolve(credential).await?;
        self.upgrade_for(&identity, requested).await
    }

    /// Upgrade an already resolved identity
    ///
    /// # Errors
    ///
    /// Returns `DowngradeRejected` or `DatabaseError`
    pub async fn upgrade_for(
        &self,
        identity: &Identity,
        requested: Tier,
    ) -> AppResult<UpgradeResponse> {
        TierPolicy::validate_upgrade(identity.tier, requested)?;

        if !self.store.upgrade_tier(identity.id, requested).await? {
            let current = self
                .store
                .get_identity(identity.id)
                .await?
                .map_or(identity.tier, |fresh| fresh.tier);
            return Err(AppError::downgrade_rejected(
                current.as_str(),
                requested.as_str(),
            ));
        }

        info!(
            identity_id = %identity.id,
            from = %identity.tier,
            to = %requested,
            "Subscription tier upgraded"
        );
        Ok(UpgradeResponse {
            message: format!("Successfully upgraded to {requested}"),
            new_tier: requested,
        })
    }

    /// Tier, quota and visible groups of the caller; not counted
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` or `DatabaseError`
    pub async fn subscription_info(&self, credential: Option<&str>) -> AppResult<SubscriptionInfo> {
        let identity = self.resolve(credential).await?;
        let usage_today = self.quota.usage_today(identity.id, Utc::now()).await?;

        Ok(SubscriptionInfo {
            tier: identity.tier,
            daily_limit: self.policy.daily_limit(identity.tier),
            usage_today,
            available_muscle_groups: self.policy.visible_muscle_groups(identity.tier).to_vec(),
        })
    }

    /// Stored recommendations, newest first; pro and above
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential`, `TierRequired`, `RateLimitExceeded` or
    /// `DatabaseError`
    pub async fn history(
        &self,
        credential: Option<&str>,
        muscle_group: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<MeteredResponse<HistoryResponse>> {
        let identity = self.resolve(credential).await?;
        self.history_for(&identity, muscle_group, limit).await
    }

    /// Stored recommendations of an already resolved identity
    ///
    /// # Errors
    ///
    /// Returns `TierRequired`, `RateLimitExceeded` or `DatabaseError`
    pub async fn history_for(
        &self,
        identity: &Identity,
        muscle_group: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<MeteredResponse<HistoryResponse>> {
        require_tier(identity, Tier::Pro, "Training history")?;
        let rate_limit = self.admit(identity, endpoints::HISTORY, Utc::now()).await?;

        let limit = limit
            .unwrap_or(limits::DEFAULT_HISTORY_LIMIT)
            .clamp(1, limits::MAX_HISTORY_LIMIT);
        let muscle_group = muscle_group
            .map(|group| group.trim().to_lowercase())
            .filter(|group| !group.is_empty());
        let history = self
            .store
            .list_history(identity.id, muscle_group.as_deref(), Some(limit))
            .await?;

        Ok(MeteredResponse {
            body: HistoryResponse {
                total: history.len(),
                history,
            },
            rate_limit,
        })
    }

    /// Aggregates over the caller's full history; pro and above
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential`, `TierRequired`, `RateLimitExceeded` or
    /// `DatabaseError`
    pub async fn analytics(
        &self,
        credential: Option<&str>,
    ) -> AppResult<MeteredResponse<TrainingAnalytics>> {
        let identity = self.resolve(credential).await?;
        require_tier(&identity, Tier::Pro, "Training analytics")?;
        let rate_limit = self
            .admit(&identity, endpoints::ANALYTICS, Utc::now())
            .await?;

        let history = self.store.list_history(identity.id, None, None).await?;
        Ok(MeteredResponse {
            body: TrainingAnalytics::from_history(&history),
            rate_limit,
        })
    }

    /// Platform statistics; enterprise only, not counted
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential`, `TierRequired` or `DatabaseError`
    pub async fn admin_stats(&self, credential: Option<&str>) -> AppResult<AdminStats> {
        let identity = self.resolve(credential).await?;
        require_tier(&identity, Tier::Enterprise, "Admin statistics")?;

        let users_by_tier = self.store.count_identities_by_tier().await?;
        Ok(AdminStats {
            total_users: users_by_tier.values().sum(),
            users_by_tier,
            requests_today: self.store.count_all_usage_on(Utc::now().date_naive()).await?,
            total_history_records: self.store.count_history().await?,
        })
    }

    async fn admit(
        &self,
        identity: &Identity,
        endpoint: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitInfo> {
        match self.quota.check_and_record(identity, endpoint, now).await? {
            QuotaDecision::Admitted { count, limit } => {
                Ok(RateLimitInfo::new(identity.tier, count, limit, now))
            }
            QuotaDecision::Denied {
                current_count,
                limit,
            } => Err(AppError::rate_limit_exceeded(
                identity.tier.as_str(),
                limit,
                current_count,
            )),
        }
    }
}

fn require_tier(identity: &Identity, required: Tier, feature: &str) -> AppResult<()> {
    if identity.tier.rank() >= required.rank() {
        Ok(())
    } else {
        Err(AppError::tier_required(feature, required.as_str()))
    }
}
