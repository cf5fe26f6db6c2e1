// ABOUTME: Training analytics computed from stored recommendation history
// ABOUTME: Aggregates per-group average volume, progress trend and recent records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use volume_core::constants::limits::ANALYTICS_RECENT_HISTORY;
use volume_core::models::{HistoryRecord, Progress};

/// Count of history records per progress answer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressTrend {
    /// Records answered `yes`
    pub yes: u32,
    /// Records answered `no`
    pub no: u32,
    /// Records answered `unclear`
    pub unclear: u32,
}

/// Aggregate view over an identity's history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingAnalytics {
    /// Number of stored records
    pub total_workouts_logged: usize,
    /// Distinct groups, sorted
    pub muscle_groups_tracked: Vec<String>,
    /// Mean `current_sets` per group
    pub average_weekly_volume: BTreeMap<String, f64>,
    /// Progress answer counts
    pub progress_trend: ProgressTrend,
    /// Newest records first
    pub recent_history: Vec<HistoryRecord>,
}

impl TrainingAnalytics {
    /// Compute analytics from records in any order
    #[must_use]
    pub fn from_history(records: &[HistoryRecord]) -> Self {
        let mut totals: BTreeMap<String, (u64, u32)> = BTreeMap::new();
        let mut progress_trend = ProgressTrend::default();

        for record in records {
            let (sum, count) = totals.entry(record.muscle_group.clone()).or_default();
            *sum += u64::from(record.current_sets);
            *count += 1;

            match record.progress {
                Progress::Yes => progress_trend.yes += 1,
                Progress::No => progress_trend.no += 1,
                Progress::Unclear => progress_trend.unclear += 1,
            }
        }

        #[allow(clippy::cast_precision_loss)]
        // Safe: set counts are small integers
        let average_weekly_volume = totals
            .iter()
            .map(|(group, (sum, count))| (group.clone(), *sum as f64 / f64::from(*count)))
            .collect();

        let mut recent_history = records.to_vec();
        recent_history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_history.truncate(ANALYTICS_RECENT_HISTORY);

        Self {
            total_workouts_logged: records.len(),
            muscle_groups_tracked: totals.into_keys().collect(),
            average_weekly_volume,
            progress_trend,
            recent_history,
        }
    }
}
