// ABOUTME: API key generation, hashing and validation
// ABOUTME: Keys are `vo_` plus random alphanumerics; only a SHA-256 digest is ever stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # API Key Management

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use volume_core::constants::key_prefixes;
use volume_core::errors::{AppError, AppResult};

pub use volume_core::models::{
    ApiKey, ApiKeyCreateResponse, ApiKeyData, ApiKeyResponse, CreateApiKeyRequest,
};

/// Maximum length of a key display name
const MAX_KEY_NAME_LEN: usize = 255;

/// API Key Manager
#[derive(Debug, Clone)]
pub struct ApiKeyManager {
    key_prefix: &'static str,
}

impl Default for ApiKeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiKeyManager {
    /// Create a new API key manager
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key_prefix: key_prefixes::LIVE,
        }
    }

    /// Generate fresh key material
    #[must_use]
    pub fn generate_api_key(&self) -> ApiKeyData {
        let random_part: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(key_prefixes::RANDOM_LEN)
            .map(char::from)
            .collect();

        let full_key = format!("{}{random_part}", self.key_prefix);
        let key_prefix = self.extract_key_prefix(&full_key);
        let key_hash = self.hash_key(&full_key);

        ApiKeyData {
            full_key,
            key_prefix,
            key_hash,
        }
    }

    /// Validate an API key format
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if the prefix, length or alphabet is wrong
    pub fn validate_key_format(&self, api_key: &str) -> AppResult<()> {
        let Some(random_part) = api_key.strip_prefix(self.key_prefix) else {
            return Err(AppError::invalid_credential("Invalid API key format"));
        };
        if random_part.len() != key_prefixes::RANDOM_LEN
            || !random_part.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::invalid_credential("Invalid API key format"));
        }
        Ok(())
    }

    /// Extract the display prefix from a full key
    #[must_use]
    pub fn extract_key_prefix(&self, api_key: &str) -> String {
        api_key
            .chars()
            .take(key_prefixes::DISPLAY_PREFIX_LEN)
            .collect()
    }

    /// Hash an API key for storage and lookup
    #[must_use]
    pub fn hash_key(&self, api_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(api_key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Build a stored key for an identity, returning it with the full key
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank or longer than 255 characters
    pub fn create_api_key(&self, identity_id: Uuid, name: &str) -> AppResult<(ApiKey, String)> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_KEY_NAME_LEN {
            return Err(AppError::invalid_input(format!(
                "API key name must be between 1 and {MAX_KEY_NAME_LEN} characters"
            )));
        }

        let data = self.generate_api_key();
        let api_key = ApiKey {
            id: Uuid::new_v4(),
            identity_id,
            name: name.to_owned(),
            key_prefix: data.key_prefix,
            key_hash: data.key_hash,
            is_active: true,
            created_at: Utc::now(),
            last_used_at: None,
        };
        Ok((api_key, data.full_key))
    }
}
