//! Configuration management
//!
//! This module handles loading and validation of the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{HmsError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the HMS backend
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HmsError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HmsError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Recognized variables: `HMS_HOST`, `HMS_PORT`, `DATABASE_URL`,
    /// `JWT_SECRET`, `JWT_EXPIRATION`.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();

        if let Ok(host) = std::env::var("HMS_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("HMS_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| HmsError::config(format!("Invalid HMS_PORT: {}", port)))?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(expiration) = std::env::var("JWT_EXPIRATION") {
            config.auth.jwt_expiration = expiration
                .parse()
                .map_err(|_| HmsError::config(format!("Invalid JWT_EXPIRATION: {}", expiration)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| HmsError::config(format!("Server config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| HmsError::config(format!("Auth config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| HmsError::config(format!("Storage config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
