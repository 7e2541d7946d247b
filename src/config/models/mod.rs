//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

pub mod auth;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use server::*;
pub use storage::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3003
}

/// Default database connection pool size
pub fn default_max_connections() -> u32 {
    10
}

/// Default database connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    30
}

/// Default JWT lifetime in seconds (seven days)
pub fn default_jwt_expiration() -> u64 {
    604_800
}
