// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Tier names, default quotas, muscle group names, key prefixes and endpoint labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Constants grouped by domain.

/// Tier identifiers as stored and serialized
pub mod tiers {
    /// Free tier
    pub const FREE: &str = "free";
    /// Pro tier
    pub const PRO: &str = "pro";
    /// Enterprise tier
    pub const ENTERPRISE: &str = "enterprise";
}

/// Default daily request quotas per tier
pub mod limits {
    /// Free tier daily requests
    pub const FREE_DAILY_LIMIT: u32 = 100;
    /// Pro tier daily requests
    pub const PRO_DAILY_LIMIT: u32 = 10_000;
    /// Enterprise tier daily requests
    pub const ENTERPRISE_DAILY_LIMIT: u32 = 1_000_000;
    /// Default number of history records returned
    pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
    /// Maximum number of history records returned
    pub const MAX_HISTORY_LIMIT: u32 = 500;
    /// Number of records included in analytics recent history
    pub const ANALYTICS_RECENT_HISTORY: usize = 10;
}

/// Monthly prices in cents
pub mod pricing {
    /// Pro tier monthly price
    pub const PRO_PRICE_MONTHLY_CENTS: u32 = 1_900;
    /// Enterprise tier monthly price
    pub const ENTERPRISE_PRICE_MONTHLY_CENTS: u32 = 19_900;
}

/// Muscle group names
pub mod muscle_groups {
    /// Chest, the only group visible to the free tier
    pub const CHEST: &str = "chest";
    /// Back
    pub const BACK: &str = "back";
    /// Shoulders
    pub const SHOULDERS: &str = "shoulders";
    /// Biceps
    pub const BICEPS: &str = "biceps";
    /// Triceps
    pub const TRICEPS: &str = "triceps";
    /// Quads
    pub const QUADS: &str = "quads";
    /// Hamstrings
    pub const HAMSTRINGS: &str = "hamstrings";
    /// Glutes
    pub const GLUTES: &str = "glutes";
    /// Calves
    pub const CALVES: &str = "calves";
    /// Abs
    pub const ABS: &str = "abs";

    /// Default group when a request omits one
    pub const DEFAULT: &str = CHEST;
}

/// API key format
pub mod key_prefixes {
    /// Prefix of every issued key
    pub const LIVE: &str = "vo_";
    /// Random characters after the prefix
    pub const RANDOM_LEN: usize = 48;
    /// Characters kept as the display prefix
    pub const DISPLAY_PREFIX_LEN: usize = 12;
}

/// Endpoint labels recorded on usage events
pub mod endpoints {
    /// Recommendation endpoint
    pub const PREDICT_VOLUME: &str = "/v1/predict-volume";
    /// History endpoint
    pub const HISTORY: &str = "/v1/history";
    /// Analytics endpoint
    pub const ANALYTICS: &str = "/v1/analytics";
}

/// HTTP header names
pub mod headers {
    /// Credential header
    pub const API_KEY: &str = "x-api-key";
}

/// Service identity
pub mod service_names {
    /// Service name used in logs and the info endpoint
    pub const VOLUME_OPTIMIZER: &str = "volume-optimizer";
}
