// ABOUTME: Main library entry point for the volume optimizer service
// ABOUTME: Tier-gated quota enforcement in front of a deterministic training volume engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

#![deny(unsafe_code)]

//! # Volume Optimizer
//!
//! Recommends weekly training-set adjustments per muscle group and gates
//! access to them by subscription tier.
//!
//! ## Architecture
//!
//! - **Tiers**: daily quota and visible muscle groups per tier
//! - **Rate limiting**: per-identity, per-UTC-day quota with atomic check-and-record
//! - **Access gate**: resolve credential, authorize, meter, compute, persist
//! - **Database plugins**: `VolumeStore` trait and its SQLite implementation
//! - **Routes**: JSON-over-HTTP surface built on `axum`
//!
//! The recommendation engine and landmark catalog live in
//! `volume-intelligence`; errors, constants and domain models live in
//! `volume-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use volume_optimizer::config::ServerConfig;
//! use volume_optimizer::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::from_config(config).await?;
//!     println!("{}", resources.config.summary());
//!     Ok(())
//! }
//! ```

/// Request orchestration for tier-gated operations
pub mod access_gate;

/// Identity registration and API key lifecycle
pub mod accounts;

/// API key generation and hashing
pub mod api_keys;

/// Environment-driven configuration
pub mod config;

/// Storage abstraction and SQLite backend
pub mod database_plugins;

/// Structured logging setup
pub mod logging;

/// HTTP middleware helpers
pub mod middleware;

/// HTTP request and response bodies
pub mod models;

/// Daily quota tracking
pub mod rate_limiting;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Tier policy
pub mod tiers;

pub use volume_core::{constants, errors};
