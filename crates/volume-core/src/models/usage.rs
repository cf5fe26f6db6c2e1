// ABOUTME: Append-only usage events and training history records
// ABOUTME: Both reference their identity by id and are never mutated after insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Progress, Recovered, TrainingLevel, TrainingState};

/// One admitted request counted against an identity's daily quota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageEvent {
    /// Identity the request belongs to
    pub identity_id: Uuid,
    /// Endpoint label
    pub endpoint: String,
    /// Admission time
    pub timestamp: DateTime<Utc>,
}

impl UsageEvent {
    /// Create a usage event
    #[must_use]
    pub fn new(identity_id: Uuid, endpoint: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity_id,
            endpoint: endpoint.into(),
            timestamp,
        }
    }

    /// UTC calendar day the event counts toward
    #[must_use]
    pub fn usage_day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// A stored recommendation for a paid identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Record id
    pub id: Uuid,
    /// Owning identity
    pub identity_id: Uuid,
    /// Muscle group the recommendation was for
    pub muscle_group: String,
    /// Weekly sets at request time
    pub current_sets: u32,
    /// Recommendation text
    pub recommendation: String,
    /// Training level at request time
    pub training_level: TrainingLevel,
    /// Progress signal at request time
    pub progress: Progress,
    /// Recovery signal at request time
    pub recovered: Recovered,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Capture a recommendation for the given training state
    #[must_use]
    pub fn from_state(
        identity_id: Uuid,
        state: &TrainingState,
        recommendation: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id,
            muscle_group: state.muscle_group.clone(),
            current_sets: state.current_sets,
            recommendation: recommendation.into(),
            training_level: state.training_level,
            progress: state.progress,
            recovered: state.recovered,
            created_at,
        }
    }
}
