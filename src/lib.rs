//! # HMS Backend
//!
//! Hospital-management backend exposing auth, user and patient services over
//! HTTP/JSON, backed by a relational store.
//!
//! The auth component issues and validates stateless bearer tokens and
//! enforces role-gated access; the resource controllers are thin CRUD over
//! the injected storage layer.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hms_backend::{server::HttpServer, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/hms.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{HmsError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
