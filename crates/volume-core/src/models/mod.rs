// ABOUTME: Core data models for the volume optimizer
// ABOUTME: Re-exports Tier, Identity, training inputs, usage/history records and API key DTOs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Data Models
//!
//! Child records (`ApiKey`, `UsageEvent`, `HistoryRecord`) hold the id of the
//! identity they belong to; no model holds a reference back to its children.

mod api_key;
mod identity;
mod tier;
mod training;
mod usage;

pub use api_key::{
    ApiKey, ApiKeyCreateResponse, ApiKeyData, ApiKeyResponse, CreateApiKeyRequest,
};
pub use identity::Identity;
pub use tier::Tier;
pub use training::{Landmark, Progress, Recovered, TrainingLevel, TrainingState};
pub use usage::{HistoryRecord, UsageEvent};
