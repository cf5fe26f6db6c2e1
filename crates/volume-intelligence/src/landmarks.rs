// ABOUTME: Immutable, load-time validated catalog of weekly volume landmarks
// ABOUTME: Maps (muscle group, training level) to MEV/MAV/MRV thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Volume Landmarks
//!
//! MEV = Minimum Effective Volume, MAV = Maximum Adaptive Volume,
//! MRV = Maximum Recoverable Volume, all in weekly working sets.
//!
//! The catalog is validated once when it is built: every group must define
//! all three training levels and every triple must satisfy `MEV <= MAV <= MRV`.
//! Lookups after construction never re-check the invariant.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use volume_core::constants::muscle_groups;
use volume_core::errors::{AppError, AppResult};
use volume_core::models::{Landmark, TrainingLevel};

/// Landmarks of one muscle group across all training levels
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MuscleGroupLandmarks {
    /// Muscle group name
    pub name: String,
    /// Beginner thresholds
    pub beginner: Landmark,
    /// Intermediate thresholds
    pub intermediate: Landmark,
    /// Advanced thresholds
    pub advanced: Landmark,
}

impl MuscleGroupLandmarks {
    /// Create an entry
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        beginner: Landmark,
        intermediate: Landmark,
        advanced: Landmark,
    ) -> Self {
        Self {
            name: name.into(),
            beginner,
            intermediate,
            advanced,
        }
    }

    /// Thresholds for a training level
    #[must_use]
    pub const fn for_level(&self, level: TrainingLevel) -> Landmark {
        match level {
            TrainingLevel::Beginner => self.beginner,
            TrainingLevel::Intermediate => self.intermediate,
            TrainingLevel::Advanced => self.advanced,
        }
    }
}

/// Validated landmark catalog
#[derive(Debug, Clone)]
pub struct LandmarkCatalog {
    entries: Vec<MuscleGroupLandmarks>,
    index: HashMap<String, usize>,
}

impl LandmarkCatalog {
    /// Build a catalog from entries, validating every invariant
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the catalog is empty, a name is blank or
    /// duplicated, or any triple violates `MEV <= MAV <= MRV`
    pub fn from_entries(entries: Vec<MuscleGroupLandmarks>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::config("landmark catalog is empty"));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() || entry.name != entry.name.to_lowercase() {
                return Err(AppError::config(format!(
                    "invalid muscle group name '{}'",
                    entry.name
                )));
            }
            for level in TrainingLevel::ALL {
                let landmark = entry.for_level(level);
                if !landmark.is_ordered() {
                    return Err(AppError::config(format!(
                        "landmarks for {}/{level} violate MEV <= MAV <= MRV ({}/{}/{})",
                        entry.name, landmark.mev, landmark.mav, landmark.mrv
                    )));
                }
            }
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(AppError::config(format!(
                    "duplicate muscle group '{}'",
                    entry.name
                )));
            }
        }

        Ok(Self { entries, index })
    }

    /// The built-in ten-group catalog
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the built-in table fails validation
    pub fn standard() -> AppResult<Self> {
        Self::from_entries(standard_entries())
    }

    /// Thresholds for a group at a level
    #[must_use]
    pub fn get(&self, muscle_group: &str, level: TrainingLevel) -> Option<Landmark> {
        self.index
            .get(muscle_group)
            .map(|&position| self.entries[position].for_level(level))
    }

    /// Thresholds for a group at a level, or `UnknownMuscleGroup`
    ///
    /// # Errors
    ///
    /// Returns `UnknownMuscleGroup` if the group is not in the catalog
    pub fn lookup(&self, muscle_group: &str, level: TrainingLevel) -> AppResult<Landmark> {
        self.get(muscle_group, level)
            .ok_or_else(|| AppError::unknown_muscle_group(muscle_group))
    }

    /// Whether the catalog knows a group
    #[must_use]
    pub fn contains(&self, muscle_group: &str) -> bool {
        self.index.contains_key(muscle_group)
    }

    /// Group names in catalog order
    #[must_use]
    pub fn muscle_groups(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// All entries in catalog order
    #[must_use]
    pub fn entries(&self) -> &[MuscleGroupLandmarks] {
        &self.entries
    }

    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested `group -> level -> landmark` table for display
    #[must_use]
    pub fn table(&self) -> BTreeMap<String, BTreeMap<&'static str, Landmark>> {
        self.entries
            .iter()
            .map(|entry| {
                let levels = TrainingLevel::ALL
                    .into_iter()
                    .map(|level| (level.as_str(), entry.for_level(level)))
                    .collect();
                (entry.name.clone(), levels)
            })
            .collect()
    }
}

fn group(name: &str, b: (u32, u32, u32), i: (u32, u32, u32), a: (u32, u32, u32)) -> MuscleGroupLandmarks {
    MuscleGroupLandmarks::new(
        name,
        Landmark::new(b.0, b.1, b.2),
        Landmark::new(i.0, i.1, i.2),
        Landmark::new(a.0, a.1, a.2),
    )
}

fn standard_entries() -> Vec<MuscleGroupLandmarks> {
    vec![
        group(muscle_groups::CHEST, (8, 12, 16), (10, 15, 20), (12, 18, 24)),
        group(muscle_groups::BACK, (10, 14, 18), (12, 16, 22), (14, 20, 26)),
        group(muscle_groups::SHOULDERS, (8, 12, 16), (10, 14, 20), (12, 16, 24)),
        group(muscle_groups::BICEPS, (6, 10, 14), (8, 12, 18), (10, 14, 22)),
        group(muscle_groups::TRICEPS, (6, 10, 14), (8, 12, 18), (10, 14, 22)),
        group(muscle_groups::QUADS, (8, 12, 16), (10, 14, 20), (12, 18, 24)),
        group(muscle_groups::HAMSTRINGS, (6, 10, 14), (8, 12, 18), (10, 14, 22)),
        group(muscle_groups::GLUTES, (6, 10, 14), (8, 12, 18), (10, 14, 22)),
        group(muscle_groups::CALVES, (8, 12, 16), (10, 14, 20), (12, 16, 24)),
        group(muscle_groups::ABS, (6, 10, 14), (8, 12, 18), (10, 14, 22)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use volume_core::errors::ErrorCode;

    #[test]
    fn test_standard_catalog_has_ten_ordered_groups() {
        let catalog = LandmarkCatalog::standard().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.muscle_groups()[0], "chest");
        for entry in catalog.entries() {
            for level in TrainingLevel::ALL {
                assert!(entry.for_level(level).is_ordered(), "{}/{level}", entry.name);
            }
        }
    }

    #[test]
    fn test_chest_values() {
        let catalog = LandmarkCatalog::standard().unwrap();
        assert_eq!(
            catalog.get("chest", TrainingLevel::Beginner),
            Some(Landmark::new(8, 12, 16))
        );
        assert_eq!(
            catalog.get("chest", TrainingLevel::Advanced),
            Some(Landmark::new(12, 18, 24))
        );
    }

    #[test]
    fn test_unordered_entry_rejected_at_load() {
        let entries = vec![group("chest", (12, 8, 16), (10, 15, 20), (12, 18, 24))];
        let error = LandmarkCatalog::from_entries(entries).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let entries = vec![
            group("chest", (8, 12, 16), (10, 15, 20), (12, 18, 24)),
            group("chest", (8, 12, 16), (10, 15, 20), (12, 18, 24)),
        ];
        assert!(LandmarkCatalog::from_entries(entries).is_err());
    }

    #[test]
    fn test_lookup_unknown_group() {
        let catalog = LandmarkCatalog::standard().unwrap();
        let error = catalog.lookup("forearms", TrainingLevel::Beginner).unwrap_err();
        assert_eq!(error.code, ErrorCode::UnknownMuscleGroup);
    }
}
