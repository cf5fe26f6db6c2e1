// ABOUTME: API key data transfer objects shared by the key manager, store and routes
// ABOUTME: Only the SHA-256 hash and a display prefix of a key are ever persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored API key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey {
    /// Key id
    pub id: Uuid,
    /// Owning identity
    pub identity_id: Uuid,
    /// Display name
    pub name: String,
    /// First characters of the full key, for display
    pub key_prefix: String,
    /// SHA-256 hex digest of the full key
    pub key_hash: String,
    /// Deactivated keys no longer authenticate
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful authentication
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Freshly generated key material
#[derive(Debug, Clone)]
pub struct ApiKeyData {
    /// Full key, shown to the caller exactly once
    pub full_key: String,
    /// Display prefix
    pub key_prefix: String,
    /// SHA-256 hex digest
    pub key_hash: String,
}

/// Request body for key creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    /// Display name, 1..=255 characters
    pub name: String,
}

/// Key listing entry (never includes the full key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    /// Key id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Display prefix
    pub key_prefix: String,
    /// Whether the key still authenticates
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last successful authentication
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id,
            name: key.name.clone(),
            key_prefix: key.key_prefix.clone(),
            is_active: key.is_active,
            created_at: key.created_at,
            last_used_at: key.last_used_at,
        }
    }
}

/// Response to key creation, carrying the full key once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyCreateResponse {
    /// Key id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Full key
    pub api_key: String,
    /// Display prefix
    pub key_prefix: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
