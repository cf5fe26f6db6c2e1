// ABOUTME: Training state inputs and volume landmark thresholds
// ABOUTME: TrainingLevel, Progress, Recovered, TrainingState and Landmark definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Training experience level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLevel {
    /// Less than a year of consistent training
    Beginner,
    /// One to three years
    Intermediate,
    /// Three years or more
    Advanced,
}

impl TrainingLevel {
    /// All levels in catalog order
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl Display for TrainingLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(AppError::invalid_input(format!("Invalid training level: {s}"))),
        }
    }
}

/// Whether the trainee is still making progress
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    /// Making progress
    Yes,
    /// Stalled
    No,
    /// Not sure yet
    Unclear,
}

impl Progress {
    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unclear => "unclear",
        }
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Progress {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unclear" => Ok(Self::Unclear),
            _ => Err(AppError::invalid_input(format!("Invalid progress value: {s}"))),
        }
    }
}

/// Whether the trainee recovers fully between sessions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Recovered {
    /// Fully recovered
    Yes,
    /// Not recovered
    No,
}

impl Recovered {
    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl Display for Recovered {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recovered {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(AppError::invalid_input(format!("Invalid recovered value: {s}"))),
        }
    }
}

/// Weekly set thresholds for one muscle group at one training level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Landmark {
    /// Minimum effective volume
    #[serde(rename = "MEV")]
    pub mev: u32,
    /// Maximum adaptive volume
    #[serde(rename = "MAV")]
    pub mav: u32,
    /// Maximum recoverable volume
    #[serde(rename = "MRV")]
    pub mrv: u32,
}

impl Landmark {
    /// Create a landmark triple
    #[must_use]
    pub const fn new(mev: u32, mav: u32, mrv: u32) -> Self {
        Self { mev, mav, mrv }
    }

    /// Whether `MEV <= MAV <= MRV` holds
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.mev <= self.mav && self.mav <= self.mrv
    }
}

/// A trainee's current weekly situation for one muscle group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingState {
    /// Weekly working sets, always positive
    pub current_sets: u32,
    /// Experience level
    pub training_level: TrainingLevel,
    /// Progress signal
    pub progress: Progress,
    /// Recovery signal
    pub recovered: Recovered,
    /// Target muscle group
    pub muscle_group: String,
}

impl TrainingState {
    /// Build a training state, rejecting zero sets and blank group names
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `current_sets` is zero or `muscle_group` is empty
    pub fn new(
        current_sets: u32,
        training_level: TrainingLevel,
        progress: Progress,
        recovered: Recovered,
        muscle_group: impl Into<String>,
    ) -> AppResult<Self> {
        if current_sets == 0 {
            return Err(AppError::invalid_input("current_sets must be greater than 0"));
        }
        let muscle_group = muscle_group.into().trim().to_lowercase();
        if muscle_group.is_empty() {
            return Err(AppError::invalid_input("muscle_group must not be empty"));
        }
        Ok(Self {
            current_sets,
            training_level,
            progress,
            recovered,
            muscle_group,
        })
    }
}
