// ABOUTME: Unified error type, error codes, and HTTP rendering for the volume optimizer
// ABOUTME: Every fallible core operation returns AppResult so callers share one error surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Unified Error Handling
//!
//! All components return [`AppResult`]. Each [`AppError`] carries a stable
//! [`ErrorCode`] (which fixes the HTTP status), a human readable message and
//! optional structured details that are rendered into the response body.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication & authorization
    /// Missing, unknown, or deactivated credential
    InvalidCredential,
    /// Requested muscle group is outside the caller's tier catalog
    MuscleGroupForbidden,
    /// Endpoint requires a higher subscription tier
    TierRequired,

    // Quota
    /// Daily request quota exhausted
    RateLimitExceeded,

    // Domain
    /// Muscle group missing from the landmark catalog
    UnknownMuscleGroup,
    /// Upgrade request targets a tier rank at or below the current one
    DowngradeRejected,

    // Validation & resources
    /// Request payload failed validation
    InvalidInput,
    /// Referenced resource does not exist
    ResourceNotFound,
    /// Resource with the same identifier already exists
    ResourceAlreadyExists,

    // Configuration & internal
    /// Configuration failed a startup invariant
    ConfigInvalid,
    /// Storage backend failure
    DatabaseError,
    /// Catch-all internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::UnknownMuscleGroup | Self::DowngradeRejected => 400,
            Self::InvalidCredential => 401,
            Self::MuscleGroupForbidden | Self::TierRequired => 403,
            Self::ResourceNotFound => 404,
            Self::ResourceAlreadyExists => 409,
            Self::RateLimitExceeded => 429,
            Self::ConfigInvalid | Self::DatabaseError | Self::InternalError => 500,
        }
    }

    /// Short user-facing description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidCredential => "Invalid or inactive API key",
            Self::MuscleGroupForbidden => "Muscle group not available for your tier",
            Self::TierRequired => "A higher subscription tier is required",
            Self::RateLimitExceeded => "Daily request limit exceeded",
            Self::UnknownMuscleGroup => "Unknown muscle group",
            Self::DowngradeRejected => "Cannot downgrade or keep the current tier",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::DatabaseError => "Database operation failed",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details rendered alongside the message
    pub details: Value,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Credential missing, unknown, or inactive
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredential, message)
    }

    /// Muscle group outside the tier catalog
    pub fn muscle_group_forbidden(muscle_group: &str, available: &[String]) -> Self {
        Self::new(
            ErrorCode::MuscleGroupForbidden,
            format!("Muscle group '{muscle_group}' requires Pro or Enterprise tier"),
        )
        .with_details(serde_json::json!({
            "muscle_group": muscle_group,
            "available_muscle_groups": available,
        }))
    }

    /// Endpoint gated behind a higher tier
    pub fn tier_required(feature: &str, required: &str) -> Self {
        Self::new(
            ErrorCode::TierRequired,
            format!("{feature} requires {required} tier or higher"),
        )
        .with_details(serde_json::json!({ "required_tier": required }))
    }

    /// Daily quota exhausted
    pub fn rate_limit_exceeded(tier: &str, limit: u32, current_count: u32) -> Self {
        Self::new(
            ErrorCode::RateLimitExceeded,
            format!("Your {tier} tier allows {limit} requests per day"),
        )
        .with_details(serde_json::json!({
            "tier": tier,
            "limit": limit,
            "current_count": current_count,
        }))
    }

    /// Muscle group absent from the landmark catalog
    pub fn unknown_muscle_group(muscle_group: &str) -> Self {
        Self::new(
            ErrorCode::UnknownMuscleGroup,
            format!("Unknown muscle group: {muscle_group}"),
        )
    }

    /// Upgrade that does not increase the tier rank
    pub fn downgrade_rejected(current: &str, requested: &str) -> Self {
        Self::new(
            ErrorCode::DowngradeRejected,
            format!("Cannot move from {current} to {requested}"),
        )
        .with_details(serde_json::json!({
            "current_tier": current,
            "requested_tier": requested,
        }))
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Configuration invariant violated
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Database failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload inside [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details, omitted when empty
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(ErrorResponse::from(self))).into_response()
    }
}
