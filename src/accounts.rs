// ABOUTME: Identity registration and API key lifecycle
// ABOUTME: Creates free-tier identities with a default key and manages their keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use volume_core::errors::{AppError, AppResult};
use volume_core::models::Identity;

use crate::api_keys::{ApiKeyCreateResponse, ApiKeyManager, ApiKeyResponse};
use crate::database_plugins::VolumeStore;
use crate::models::RegisterResponse;

/// Name of the key issued at registration
const DEFAULT_KEY_NAME: &str = "Default key";

/// Registration and key management
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn VolumeStore>,
    key_manager: ApiKeyManager,
}

impl AccountService {
    /// Create the service over a store
    #[must_use]
    pub fn new(store: Arc<dyn VolumeStore>) -> Self {
        Self {
            store,
            key_manager: ApiKeyManager::new(),
        }
    }

    /// Register a free-tier identity and issue its first key
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email and
    /// `ResourceAlreadyExists` if the email is taken
    pub async fn register(&self, email: &str) -> AppResult<RegisterResponse> {
        let email = normalize_email(email)?;
        if self.store.get_identity_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Identity with email {email} already exists"
            )));
        }

        let identity = Identity::new(email);
        self.store.create_identity(&identity).await?;
        let (api_key, full_key) = self
            .key_manager
            .create_api_key(identity.id, DEFAULT_KEY_NAME)?;
        self.store.create_api_key(&api_key).await?;

        info!(identity_id = %identity.id, "Registered new identity");
        Ok(RegisterResponse {
            identity_id: identity.id,
            api_key: full_key,
        })
    }

    /// Issue an additional key
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad name or `DatabaseError`
    pub async fn create_key(&self, identity_id: Uuid, name: &str) -> AppResult<ApiKeyCreateResponse> {
        let (api_key, full_key) = self.key_manager.create_api_key(identity_id, name)?;
        self.store.create_api_key(&api_key).await?;

        Ok(ApiKeyCreateResponse {
            id: api_key.id,
            name: api_key.name,
            api_key: full_key,
            key_prefix: api_key.key_prefix,
            created_at: api_key.created_at,
        })
    }

    /// Keys of an identity, without secrets
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if listing fails
    pub async fn list_keys(&self, identity_id: Uuid) -> AppResult<Vec<ApiKeyResponse>> {
        let keys = self.store.list_api_keys(identity_id).await?;
        Ok(keys.iter().map(ApiKeyResponse::from).collect())
    }

    /// Deactivate one of the identity's keys
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the identity owns no such key
    pub async fn revoke_key(&self, identity_id: Uuid, key_id: Uuid) -> AppResult<()> {
        if self.store.deactivate_api_key(identity_id, key_id).await? {
            info!(identity_id = %identity_id, key_id = %key_id, "API key deactivated");
            Ok(())
        } else {
            Err(AppError::not_found(format!("API key {key_id}")))
        }
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(email)
    } else {
        Err(AppError::invalid_input(format!("Invalid email address: {email}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalization() {
        assert_eq!(
            normalize_email("  Lifter@Example.COM ").unwrap(),
            "lifter@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("user@localhost").is_err());
    }
}
