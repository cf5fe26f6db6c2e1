// ABOUTME: Tier policy: daily quota, visible muscle groups and upgrade rules per tier
// ABOUTME: Built once from configuration and the landmark catalog, then shared read-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Tier Policy
//!
//! Quota and catalog visibility are pure functions of the tier. The free tier
//! sees only `chest`; paid tiers see the whole catalog.

use std::collections::BTreeSet;

use volume_core::constants::muscle_groups;
use volume_core::errors::{AppError, AppResult};
use volume_core::models::Tier;
use volume_intelligence::LandmarkCatalog;

use crate::config::TierLimits;

/// Immutable tier lookup table
#[derive(Debug, Clone)]
pub struct TierPolicy {
    limits: TierLimits,
    free_groups: Vec<String>,
    paid_groups: Vec<String>,
}

impl TierPolicy {
    /// Build the policy from validated limits and the catalog's group list
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the limits are not strictly increasing or
    /// the free-tier group is missing from the catalog
    pub fn new(limits: TierLimits, catalog: &LandmarkCatalog) -> AppResult<Self> {
        limits.validate()?;
        if !catalog.contains(muscle_groups::CHEST) {
            return Err(AppError::config(format!(
                "landmark catalog has no entry for the free tier group '{}'",
                muscle_groups::CHEST
            )));
        }
        Ok(Self {
            limits,
            free_groups: vec![muscle_groups::CHEST.to_owned()],
            paid_groups: catalog.muscle_groups(),
        })
    }

    /// Requests allowed per UTC day
    #[must_use]
    pub const fn daily_limit(&self, tier: Tier) -> u32 {
        self.limits.for_tier(tier)
    }

    /// Groups the tier may request, in catalog order
    #[must_use]
    pub fn visible_muscle_groups(&self, tier: Tier) -> &[String] {
        if tier.is_paid() {
            &self.paid_groups
        } else {
            &self.free_groups
        }
    }

    /// Visible groups as a set
    #[must_use]
    pub fn visible_set(&self, tier: Tier) -> BTreeSet<&str> {
        self.visible_muscle_groups(tier)
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Whether `group` is in the tier's catalog
    #[must_use]
    pub fn is_visible(&self, tier: Tier, group: &str) -> bool {
        self.visible_muscle_groups(tier)
            .iter()
            .any(|visible| visible == group)
    }

    /// Ordering used for upgrade validation
    #[must_use]
    pub const fn rank(tier: Tier) -> u8 {
        tier.rank()
    }

    /// Every group visible to any tier
    #[must_use]
    pub fn all_visible_groups(&self) -> BTreeSet<&str> {
        Tier::ALL
            .iter()
            .flat_map(|tier| self.visible_muscle_groups(*tier))
            .map(String::as_str)
            .collect()
    }

    /// Only strictly higher tiers are valid upgrade targets
    ///
    /// # Errors
    ///
    /// Returns `DowngradeRejected` if `requested` does not outrank `current`
    pub fn validate_upgrade(current: Tier, requested: Tier) -> AppResult<()> {
        if Self::rank(requested) > Self::rank(current) {
            Ok(())
        } else {
            Err(AppError::downgrade_rejected(
                current.as_str(),
                requested.as_str(),
            ))
        }
    }

    /// Limits this policy was built from
    #[must_use]
    pub const fn limits(&self) -> &TierLimits {
        &self.limits
    }
}
