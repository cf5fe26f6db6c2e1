// ABOUTME: Identity model: the authenticated principal and its current tier
// ABOUTME: Identities are created on the free tier and only ever move upward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tier;

/// An authenticated principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Opaque principal id
    pub id: Uuid,
    /// Contact email, unique per identity
    pub email: String,
    /// Current subscription tier
    pub tier: Tier,
    /// Inactive identities cannot authenticate
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// New active identity on the free tier
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            tier: Tier::Free,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Same identity placed on a specific tier
    #[must_use]
    pub const fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }
}
