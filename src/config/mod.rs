// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes the environment-driven ServerConfig and the tier quota/pricing values it carries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Configuration module for the volume optimizer server
//!
//! Configuration is read once at startup and then passed around as an
//! immutable value. Nothing in the server reads the environment after
//! `ServerConfig::from_env` returns.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, PricingConfig, ServerConfig, TierLimits};
