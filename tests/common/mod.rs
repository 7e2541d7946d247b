//! Shared test infrastructure

pub mod fixtures;

use hms_backend::auth::AuthService;
use hms_backend::config::{AuthConfig, DatabaseConfig, StorageConfig};
use hms_backend::storage::StorageLayer;
use std::sync::Arc;

/// Build a migrated in-memory storage layer
pub async fn test_storage() -> Arc<StorageLayer> {
    let config = StorageConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        },
    };

    let storage = Arc::new(
        StorageLayer::new(&config)
            .await
            .expect("failed to create storage layer"),
    );
    storage.migrate().await.expect("migration failed");
    storage
}

/// Auth configuration with a short token lifetime for tests
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test_secret_key_for_testing_only_0123456789".to_string(),
        jwt_expiration: 3600,
    }
}

/// Build an auth service over a fresh in-memory store
pub async fn test_auth_service() -> (AuthService, Arc<StorageLayer>) {
    let storage = test_storage().await;
    let auth = AuthService::new(&test_auth_config(), Arc::clone(&storage));
    (auth, storage)
}
