// ABOUTME: Core types and constants for the volume optimizer
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

#![deny(unsafe_code)]

//! # Volume Core
//!
//! Foundation crate shared by the recommendation engine and the server. It is
//! meant to change rarely.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, `AppResult`
//! - **constants**: tier names, default quotas, muscle groups, key format
//! - **models**: `Tier`, `Identity`, training inputs, landmarks, usage and history records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
