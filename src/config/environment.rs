// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, tier quotas and pricing from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! Environment-based configuration management

use std::env;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use volume_core::constants::{limits, pricing};
use volume_core::errors::{AppError, AppResult};
use volume_core::models::Tier;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default bind host
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default SQLite location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/volume_optimizer.db";
/// Default overall request deadline
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
            Self::Testing => f.write_str("testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory SQLite, shared over a single connection
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL; bare paths are treated as SQLite files
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a connection string accepted by `sqlx`
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_connection_string())
    }
}

/// Daily request quota per tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierLimits {
    /// Free tier requests per UTC day
    pub free: u32,
    /// Pro tier requests per UTC day
    pub pro: u32,
    /// Enterprise tier requests per UTC day
    pub enterprise: u32,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            free: limits::FREE_DAILY_LIMIT,
            pro: limits::PRO_DAILY_LIMIT,
            enterprise: limits::ENTERPRISE_DAILY_LIMIT,
        }
    }
}

impl TierLimits {
    /// Quota for a tier
    #[must_use]
    pub const fn for_tier(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Free => self.free,
            Tier::Pro => self.pro,
            Tier::Enterprise => self.enterprise,
        }
    }

    /// Require `0 < free < pro < enterprise`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the ordering does not hold
    pub fn validate(&self) -> AppResult<()> {
        if self.free == 0 {
            return Err(AppError::config("free tier daily limit must be positive"));
        }
        if self.free >= self.pro || self.pro >= self.enterprise {
            return Err(AppError::config(format!(
                "tier limits must be strictly increasing, got free={} pro={} enterprise={}",
                self.free, self.pro, self.enterprise
            )));
        }
        Ok(())
    }
}

/// Monthly subscription prices in cents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingConfig {
    /// Pro tier monthly price
    pub pro_monthly_cents: u32,
    /// Enterprise tier monthly price
    pub enterprise_monthly_cents: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            pro_monthly_cents: pricing::PRO_PRICE_MONTHLY_CENTS,
            enterprise_monthly_cents: pricing::ENTERPRISE_PRICE_MONTHLY_CENTS,
        }
    }
}

impl PricingConfig {
    /// Monthly price of a tier in cents; the free tier costs nothing
    #[must_use]
    pub const fn monthly_cents(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Free => 0,
            Tier::Pro => self.pro_monthly_cents,
            Tier::Enterprise => self.enterprise_monthly_cents,
        }
    }

    /// Monthly price of a tier in dollars
    #[must_use]
    pub fn monthly_dollars(&self, tier: Tier) -> f64 {
        f64::from(self.monthly_cents(tier)) / 100.0
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database: DatabaseUrl,
    /// Deployment environment
    pub environment: Environment,
    /// Daily quota per tier
    pub tier_limits: TierLimits,
    /// Monthly prices
    pub pricing: PricingConfig,
    /// Overall deadline applied to each HTTP request
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            database: DatabaseUrl::default(),
            environment: Environment::default(),
            tier_limits: TierLimits::default(),
            pricing: PricingConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the tier limits
    /// are not strictly increasing
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", DEFAULT_HOST),
            http_port: env_parse_or("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            database: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            tier_limits: TierLimits {
                free: env_parse_or("FREE_TIER_DAILY_LIMIT", limits::FREE_DAILY_LIMIT)?,
                pro: env_parse_or("PRO_TIER_DAILY_LIMIT", limits::PRO_DAILY_LIMIT)?,
                enterprise: env_parse_or(
                    "ENTERPRISE_TIER_DAILY_LIMIT",
                    limits::ENTERPRISE_DAILY_LIMIT,
                )?,
            },
            pricing: PricingConfig {
                pro_monthly_cents: env_parse_or(
                    "PRO_PRICE_MONTHLY_CENTS",
                    pricing::PRO_PRICE_MONTHLY_CENTS,
                )?,
                enterprise_monthly_cents: env_parse_or(
                    "ENTERPRISE_PRICE_MONTHLY_CENTS",
                    pricing::ENTERPRISE_PRICE_MONTHLY_CENTS,
                )?,
            },
            request_timeout_secs: env_parse_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        };

        config
            .tier_limits
            .validate()
            .context("Invalid tier limit configuration")?;

        Ok(config)
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Volume Optimizer Configuration:\n\
             - Bind: {}\n\
             - Database: {}\n\
             - Environment: {}\n\
             - Daily Limits: free={} pro={} enterprise={}\n\
             - Pricing (cents/month): pro={} enterprise={}\n\
             - Request Timeout: {}s",
            self.bind_address(),
            if self.database.is_memory() {
                "SQLite (memory)"
            } else {
                "SQLite"
            },
            self.environment,
            self.tier_limits.free,
            self.tier_limits.pro,
            self.tier_limits.enterprise,
            self.pricing.pro_monthly_cents,
            self.pricing.enterprise_monthly_cents,
            self.request_timeout_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
