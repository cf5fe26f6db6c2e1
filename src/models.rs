// ABOUTME: Request and response bodies of the HTTP API
// ABOUTME: Domain models live in volume-core; this module holds the wire shapes built from them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # API Models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use volume_core::constants::muscle_groups;
use volume_core::errors::{AppError, AppResult};
use volume_intelligence::TrainingAnalytics;

pub use volume_core::models::{
    HistoryRecord, Identity, Landmark, Progress, Recovered, Tier, TrainingLevel, TrainingState,
};

fn default_muscle_group() -> String {
    muscle_groups::DEFAULT.to_owned()
}

/// Body of `POST /v1/predict-volume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRequest {
    /// Weekly working sets; must be positive
    pub current_sets: i64,
    /// Experience level
    pub training_level: TrainingLevel,
    /// Progress signal
    pub progress: Progress,
    /// Recovery signal
    pub recovered: Recovered,
    /// Target group, `chest` when omitted
    #[serde(default = "default_muscle_group")]
    pub muscle_group: String,
}

impl VolumeRequest {
    /// Validate into a training state
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `current_sets` is not a positive 32-bit
    /// integer or the group name is blank
    pub fn into_state(self) -> AppResult<TrainingState> {
        let current_sets = u32::try_from(self.current_sets)
            .map_err(|_| AppError::invalid_input("current_sets must be greater than 0"))?;
        TrainingState::new(
            current_sets,
            self.training_level,
            self.progress,
            self.recovered,
            self.muscle_group,
        )
    }
}

/// Recommendation returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeResponse {
    /// Instruction text
    pub volume_prediction: String,
    /// Echoed weekly sets
    pub current_sets: u32,
    /// Echoed group
    pub muscle_group: String,
    /// Echoed level
    pub training_level: TrainingLevel,
    /// Landmark snapshot; paid tiers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Landmark>,
}

/// Body of `GET /subscription/info`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionInfo {
    /// Current tier
    pub tier: Tier,
    /// Daily quota
    pub daily_limit: u32,
    /// Requests admitted today
    pub usage_today: u32,
    /// Groups the tier may request
    pub available_muscle_groups: Vec<String>,
}

/// Body of `POST /subscription/upgrade`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRequest {
    /// Target tier
    pub tier: Tier,
}

/// Successful upgrade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpgradeResponse {
    /// Confirmation text
    pub message: String,
    /// Tier now in effect
    pub new_tier: Tier,
}

/// Query of `GET /v1/history`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Only records for this group
    pub muscle_group: Option<String>,
    /// Maximum records, clamped to `1..=500`
    pub limit: Option<u32>,
}

/// Body of `GET /v1/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Number of records returned
    pub total: usize,
    /// Newest first
    pub history: Vec<HistoryRecord>,
}

/// Body of `GET /v1/analytics`
pub type AnalyticsResponse = TrainingAnalytics;

/// Body of `GET /admin/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStats {
    /// All identities
    pub total_users: u64,
    /// Identities per tier
    pub users_by_tier: BTreeMap<Tier, u64>,
    /// Usage events recorded today across identities
    pub requests_today: u64,
    /// All stored history records
    pub total_history_records: u64,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Contact email
    pub email: String,
}

/// Successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// New identity id
    pub identity_id: Uuid,
    /// Default API key, shown once
    pub api_key: String,
}

/// Body of `GET /auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentitySummary {
    /// Identity id
    pub identity_id: Uuid,
    /// Contact email
    pub email: String,
    /// Current tier
    pub tier: Tier,
    /// Whether the identity can authenticate
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            identity_id: identity.id,
            email: identity.email.clone(),
            tier: identity.tier,
            is_active: identity.is_active,
            created_at: identity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_request_defaults_to_chest() {
        let request: VolumeRequest = serde_json::from_value(serde_json::json!({
            "current_sets": 12,
            "training_level": "intermediate",
            "progress": "yes",
            "recovered": "yes"
        }))
        .unwrap();
        assert_eq!(request.muscle_group, "chest");
        assert_eq!(request.into_state().unwrap().current_sets, 12);
    }

    #[test]
    fn test_non_positive_sets_rejected() {
        for sets in [0, -3] {
            let request = VolumeRequest {
                current_sets: sets,
                training_level: TrainingLevel::Beginner,
                progress: Progress::No,
                recovered: Recovered::Yes,
                muscle_group: "chest".into(),
            };
            assert!(request.into_state().is_err());
        }
    }

    #[test]
    fn test_free_response_omits_landmarks() {
        let response = VolumeResponse {
            volume_prediction: "maintain current volume".into(),
            current_sets: 12,
            muscle_group: "chest".into(),
            training_level: TrainingLevel::Intermediate,
            landmarks: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("landmarks").is_none());
    }
}
