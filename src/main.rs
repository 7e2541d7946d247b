//! HMS Backend - hospital management service
//!
//! Serves the auth, user and patient APIs consumed by the web dashboard.

use hms_backend::{server::HttpServer, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Default configuration file location
const DEFAULT_CONFIG_PATH: &str = "config/hms.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    // Environment first so RUST_LOG from .env reaches the subscriber
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> hms_backend::Result<()> {
    let config_path =
        std::env::var("HMS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    // A config file wins; otherwise fall back to environment variables.
    let config = if tokio::fs::try_exists(&config_path).await.unwrap_or(false) {
        Config::from_file(&config_path).await?
    } else {
        Config::from_env()?
    };

    let server = HttpServer::new(&config).await?;
    server.start().await
}
