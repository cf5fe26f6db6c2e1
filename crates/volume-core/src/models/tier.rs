// ABOUTME: Subscription tier model with ordering used for quota and upgrade rules
// ABOUTME: Tier parses from and renders to its lowercase storage name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::tiers;
use crate::errors::AppError;

/// Subscription tier, ordered `Free < Pro < Enterprise`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier: chest only, 100 requests per day
    Free,
    /// Pro tier: full catalog, history and analytics
    Pro,
    /// Enterprise tier: full catalog and admin statistics
    Enterprise,
}

impl Tier {
    /// All tiers in rank order
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Enterprise];

    /// Numeric rank used for upgrade validation
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Pro => 1,
            Self::Enterprise => 2,
        }
    }

    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => tiers::FREE,
            Self::Pro => tiers::PRO,
            Self::Enterprise => tiers::ENTERPRISE,
        }
    }

    /// Whether this is a paid tier
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            tiers::FREE => Ok(Self::Free),
            tiers::PRO => Ok(Self::Pro),
            tiers::ENTERPRISE => Ok(Self::Enterprise),
            _ => Err(AppError::invalid_input(format!("Invalid tier: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_strictly_increasing() {
        assert!(Tier::Free.rank() < Tier::Pro.rank());
        assert!(Tier::Pro.rank() < Tier::Enterprise.rank());
        assert!(Tier::Free < Tier::Enterprise);
    }

    #[test]
    fn test_parse_round_trip_names() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert!("platinum".parse::<Tier>().is_err());
    }
}
