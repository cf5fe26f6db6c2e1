// ABOUTME: Unit tests for environment-driven server configuration
// ABOUTME: Validates defaults, overrides, parse failures and tier limit ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use serial_test::serial;
use volume_optimizer::config::{DatabaseUrl, Environment, ServerConfig, TierLimits};
use volume_optimizer::logging::{LogFormat, LoggingConfig};
use volume_optimizer::models::Tier;

const CONFIG_VARS: [&str; 11] = [
    "HOST",
    "HTTP_PORT",
    "DATABASE_URL",
    "ENVIRONMENT",
    "FREE_TIER_DAILY_LIMIT",
    "PRO_TIER_DAILY_LIMIT",
    "ENTERPRISE_TIER_DAILY_LIMIT",
    "PRO_PRICE_MONTHLY_CENTS",
    "ENTERPRISE_PRICE_MONTHLY_CENTS",
    "REQUEST_TIMEOUT_SECS",
    "LOG_FORMAT",
];

fn clear_config_env() {
    for key in CONFIG_VARS {
        env::remove_var(key);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite://./data/app.db"),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/app.db")
        }
    );
    assert_eq!(
        DatabaseUrl::Memory.to_connection_string(),
        "sqlite::memory:"
    );
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_config_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.bind_address(), "0.0.0.0:8081");
    assert_eq!(config.tier_limits, TierLimits::default());
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.pricing.monthly_cents(Tier::Enterprise), 19_900);
    assert_eq!(config.request_timeout_secs, 30);
    assert!(!config.database.is_memory());
}

#[test]
#[serial]
fn test_overrides_from_env() {
    clear_config_env();
    env::set_var("HOST", "127.0.0.1");
    env::set_var("HTTP_PORT", "9000");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("FREE_TIER_DAILY_LIMIT", "5");
    env::set_var("PRO_TIER_DAILY_LIMIT", "50");
    env::set_var("ENTERPRISE_TIER_DAILY_LIMIT", "500");
    env::set_var("PRO_PRICE_MONTHLY_CENTS", "2500");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.bind_address(), "127.0.0.1:9000");
    assert!(config.database.is_memory());
    assert!(config.environment.is_production());
    assert_eq!(config.tier_limits.for_tier(Tier::Free), 5);
    assert_eq!(config.tier_limits.for_tier(Tier::Enterprise), 500);
    assert_eq!(config.pricing.monthly_cents(Tier::Pro), 2_500);
    assert!(config.summary().contains("free=5 pro=50 enterprise=500"));
}

#[test]
#[serial]
fn test_unparseable_value_is_error() {
    clear_config_env();
    env::set_var("HTTP_PORT", "not-a-port");
    let error = ServerConfig::from_env().unwrap_err();
    clear_config_env();

    assert!(error.to_string().contains("HTTP_PORT"));
}

#[test]
#[serial]
fn test_non_increasing_limits_rejected() {
    clear_config_env();
    env::set_var("FREE_TIER_DAILY_LIMIT", "20000");
    let result = ServerConfig::from_env();
    clear_config_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_config_env();
    env::set_var("LOG_FORMAT", "json");
    let config = LoggingConfig::from_env();
    clear_config_env();

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("unknown"), LogFormat::Pretty);
}
