// ABOUTME: Volume intelligence: landmark catalog, recommendation engine, analytics
// ABOUTME: Pure, synchronous computations with no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

#![deny(unsafe_code)]

//! # Volume Intelligence
//!
//! Everything in this crate is deterministic and side-effect free, so it can
//! be called from request handlers without suspending.

/// Training analytics over stored history
pub mod analytics;

/// Validated MEV/MAV/MRV landmark catalog
pub mod landmarks;

/// Weekly volume recommendation engine
pub mod recommendation_engine;

pub use analytics::{ProgressTrend, TrainingAnalytics};
pub use landmarks::{LandmarkCatalog, MuscleGroupLandmarks};
pub use recommendation_engine::{
    decide, VolumePrediction, VolumeRecommendation, VolumeRecommendationEngine,
};
