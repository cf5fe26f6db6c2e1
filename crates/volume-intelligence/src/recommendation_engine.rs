// ABOUTME: Deterministic weekly volume recommendation engine
// ABOUTME: Compares current sets against MEV/MAV/MRV landmarks using progress and recovery signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Volume recommendation engine.
//!
//! Branch precedence, first match wins:
//!
//! 1. progress `yes` → maintain
//! 2. progress `no`:
//!    - sets below MEV → increase to MEV
//!    - sets below MAV and recovered → increase to MAV
//!    - sets above MRV and not recovered → decrease to MRV
//!    - otherwise → maintain and reassess next week
//! 3. progress `unclear` → reassess in two weeks

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use serde::Serialize;
use volume_core::errors::AppResult;
use volume_core::models::{Landmark, Progress, Recovered, TrainingState};

use crate::landmarks::LandmarkCatalog;

/// Adjustment instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "target_sets", rename_all = "snake_case")]
pub enum VolumePrediction {
    /// Keep the current volume
    Maintain,
    /// Raise volume to at least MEV
    IncreaseToMev(u32),
    /// Raise volume to at least MAV
    IncreaseToMav(u32),
    /// Lower volume to at most MRV
    DecreaseToMrv(u32),
    /// Keep volume, check again next week
    MaintainAndReassess,
    /// Not enough signal, check again in two weeks
    ReassessLater,
}

impl Display for VolumePrediction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Maintain => f.write_str("maintain current volume"),
            Self::IncreaseToMev(sets) | Self::IncreaseToMav(sets) => {
                write!(f, "increase to at least {sets}")
            }
            Self::DecreaseToMrv(sets) => write!(f, "decrease to at most {sets}"),
            Self::MaintainAndReassess => f.write_str("maintain current volume, reassess next week"),
            Self::ReassessLater => f.write_str("reassess in two weeks"),
        }
    }
}

/// Engine output: the instruction and the landmarks it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRecommendation {
    /// Adjustment instruction
    pub prediction: VolumePrediction,
    /// Landmark snapshot used for the decision
    pub landmarks: Landmark,
}

impl VolumeRecommendation {
    /// Instruction text
    #[must_use]
    pub fn text(&self) -> String {
        self.prediction.to_string()
    }
}

/// Decide an adjustment for already-resolved landmarks
#[must_use]
pub const fn decide(
    current_sets: u32,
    progress: Progress,
    recovered: Recovered,
    landmarks: Landmark,
) -> VolumePrediction {
    match progress {
        Progress::Yes => VolumePrediction::Maintain,
        Progress::No => {
            if current_sets < landmarks.mev {
                VolumePrediction::IncreaseToMev(landmarks.mev)
            } else if current_sets < landmarks.mav && matches!(recovered, Recovered::Yes) {
                VolumePrediction::IncreaseToMav(landmarks.mav)
            } else if current_sets > landmarks.mrv && matches!(recovered, Recovered::No) {
                VolumePrediction::DecreaseToMrv(landmarks.mrv)
            } else {
                VolumePrediction::MaintainAndReassess
            }
        }
        Progress::Unclear => VolumePrediction::ReassessLater,
    }
}

/// Stateless engine over a shared landmark catalog
#[derive(Debug, Clone)]
pub struct VolumeRecommendationEngine {
    catalog: Arc<LandmarkCatalog>,
}

impl VolumeRecommendationEngine {
    /// Create an engine over a validated catalog
    #[must_use]
    pub const fn new(catalog: Arc<LandmarkCatalog>) -> Self {
        Self { catalog }
    }

    /// Catalog backing this engine
    #[must_use]
    pub fn catalog(&self) -> &LandmarkCatalog {
        &self.catalog
    }

    /// Recommend a weekly volume adjustment
    ///
    /// # Errors
    ///
    /// Returns `UnknownMuscleGroup` if the group is absent from the catalog
    pub fn recommend(&self, state: &TrainingState) -> AppResult<VolumeRecommendation> {
        let landmarks = self
            .catalog
            .lookup(&state.muscle_group, state.training_level)?;
        Ok(VolumeRecommendation {
            prediction: decide(state.current_sets, state.progress, state.recovered, landmarks),
            landmarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volume_core::errors::ErrorCode;
    use volume_core::models::TrainingLevel;

    fn engine() -> VolumeRecommendationEngine {
        VolumeRecommendationEngine::new(Arc::new(LandmarkCatalog::standard().unwrap()))
    }

    fn state(
        sets: u32,
        level: TrainingLevel,
        progress: Progress,
        recovered: Recovered,
        group: &str,
    ) -> TrainingState {
        TrainingState::new(sets, level, progress, recovered, group).unwrap()
    }

    fn text(sets: u32, level: TrainingLevel, progress: Progress, recovered: Recovered) -> String {
        engine()
            .recommend(&state(sets, level, progress, recovered, "chest"))
            .unwrap()
            .text()
    }

    #[test]
    fn test_progress_yes_maintains() {
        assert_eq!(
            text(12, TrainingLevel::Intermediate, Progress::Yes, Recovered::Yes),
            "maintain current volume"
        );
    }

    #[test]
    fn test_below_mev_increases_to_mev() {
        assert_eq!(
            text(6, TrainingLevel::Beginner, Progress::No, Recovered::Yes),
            "increase to at least 8"
        );
        // MEV wins even when not recovered
        assert_eq!(
            text(6, TrainingLevel::Beginner, Progress::No, Recovered::No),
            "increase to at least 8"
        );
    }

    #[test]
    fn test_below_mav_and_recovered_increases_to_mav() {
        assert_eq!(
            text(9, TrainingLevel::Beginner, Progress::No, Recovered::Yes),
            "increase to at least 12"
        );
    }

    #[test]
    fn test_above_mrv_and_not_recovered_decreases() {
        assert_eq!(
            text(25, TrainingLevel::Advanced, Progress::No, Recovered::No),
            "decrease to at most 24"
        );
    }

    #[test]
    fn test_remaining_no_progress_cases_maintain_and_reassess() {
        // Between MAV and MRV, not recovered
        assert_eq!(
            text(14, TrainingLevel::Beginner, Progress::No, Recovered::No),
            "maintain current volume, reassess next week"
        );
        // Under MAV but not recovered
        assert_eq!(
            text(9, TrainingLevel::Beginner, Progress::No, Recovered::No),
            "maintain current volume, reassess next week"
        );
        // Above MRV but recovered
        assert_eq!(
            text(30, TrainingLevel::Beginner, Progress::No, Recovered::Yes),
            "maintain current volume, reassess next week"
        );
    }

    #[test]
    fn test_exact_thresholds() {
        // sets == MEV is not below MEV; recovered so MAV branch applies
        assert_eq!(
            text(8, TrainingLevel::Beginner, Progress::No, Recovered::Yes),
            "increase to at least 12"
        );
        // sets == MRV is not above MRV
        assert_eq!(
            text(16, TrainingLevel::Beginner, Progress::No, Recovered::No),
            "maintain current volume, reassess next week"
        );
    }

    #[test]
    fn test_unclear_reassesses_later() {
        assert_eq!(
            text(15, TrainingLevel::Intermediate, Progress::Unclear, Recovered::Yes),
            "reassess in two weeks"
        );
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let engine = engine();
        let input = state(13, TrainingLevel::Intermediate, Progress::No, Recovered::Yes, "back");
        assert_eq!(
            engine.recommend(&input).unwrap(),
            engine.recommend(&input).unwrap()
        );
    }

    #[test]
    fn test_unknown_group_fails() {
        let input = state(10, TrainingLevel::Beginner, Progress::Yes, Recovered::Yes, "forearms");
        let error = engine().recommend(&input).unwrap_err();
        assert_eq!(error.code, ErrorCode::UnknownMuscleGroup);
    }

    #[test]
    fn test_snapshot_matches_catalog() {
        let input = state(10, TrainingLevel::Advanced, Progress::Yes, Recovered::Yes, "back");
        let recommendation = engine().recommend(&input).unwrap();
        assert_eq!(recommendation.landmarks, Landmark::new(14, 20, 26));
    }
}
