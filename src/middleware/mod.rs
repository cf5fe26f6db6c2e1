// ABOUTME: HTTP middleware helpers
// ABOUTME: Rate limit header rendering for quota-counted endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

/// Rate limit response headers
pub mod rate_limiting;

pub use rate_limiting::create_rate_limit_headers;
