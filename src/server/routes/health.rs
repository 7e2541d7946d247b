//! Health check and service info endpoints

use crate::server::routes::ApiResponse;
use crate::server::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use std::borrow::Cow;
use tracing::debug;

/// Service name reported by the banner and health endpoints
const SERVICE_NAME: &str = "HMS Backend";

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(service_info))
        .service(
            web::scope("/health")
                .route("", web::get().to(health_check))
                .route("/detailed", web::get().to(detailed_health_check)),
        )
        .route("/version", web::get().to(version_info));
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    service: Cow<'static, str>,
    version: Cow<'static, str>,
}

/// Detailed health status
#[derive(Debug, Clone, serde::Serialize)]
struct DetailedHealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    service: Cow<'static, str>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    database: bool,
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

/// Service banner with the endpoint catalog
async fn service_info() -> HttpResponse {
    debug!("Service info requested");

    HttpResponse::Ok().json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "GET /health": "Health check",
            "POST /auth/register": "User registration",
            "POST /auth/login": "User login",
            "POST /auth/verify-token": "Verify JWT token",
            "GET /auth/profile": "Get user profile",
            "POST /users": "Create user (admin)",
            "GET /users": "List users (admin)",
            "GET /users/{id}": "Get user by ID (admin)",
            "PUT /users/{id}/status": "Activate/deactivate user (admin)",
            "POST /patients": "Create patient (staff)",
            "GET /patients/{id}": "Get patient by ID (staff)",
            "PUT /patients/{id}": "Update patient (staff)",
            "POST /appointments": "Create appointment (staff)",
            "GET /patients/{id}/appointments": "Get patient appointments"
        }
    }))
}

/// Basic health check endpoint
///
/// Used by load balancers; answers without touching the store.
async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("OK"),
        timestamp: chrono::Utc::now(),
        service: Cow::Borrowed(SERVICE_NAME),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Detailed health check endpoint
///
/// Adds a database connectivity probe.
async fn detailed_health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Detailed health check requested");

    let database_healthy = state.storage.health_check().await.is_ok();

    let detailed_status = DetailedHealthStatus {
        status: if database_healthy {
            Cow::Borrowed("OK")
        } else {
            Cow::Borrowed("degraded")
        },
        timestamp: chrono::Utc::now(),
        service: Cow::Borrowed(SERVICE_NAME),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: get_uptime_seconds(),
        database: database_healthy,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detailed_status)))
}

/// Version information endpoint
async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(version_info))
}

/// Get process uptime in seconds
fn get_uptime_seconds() -> u64 {
    static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
    let start = START_TIME.get_or_init(std::time::Instant::now);
    start.elapsed().as_secs()
}
