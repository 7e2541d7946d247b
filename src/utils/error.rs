//! Error types for the HMS backend
//!
//! All failures are normalized into the uniform `{status, message}` envelope
//! at the HTTP boundary. Expected outcomes (validation, conflict, bad
//! credentials) carry their own variants so callers can branch on them
//! without inspecting strings.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the HMS backend
pub type Result<T> = std::result::Result<T, HmsError>;

/// Main error type for the HMS backend
#[derive(Error, Debug)]
pub enum HmsError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input, caught before any store call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate resource (e.g. email already registered)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or invalid/expired token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Missing resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying store call failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Token encoding/decoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Password hashing errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server startup/runtime errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl HmsError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a crypto error
    pub fn crypto<S: Into<String>>(msg: S) -> Self {
        Self::Crypto(msg.into())
    }

    /// Create a server error
    pub fn server<S: Into<String>>(msg: S) -> Self {
        Self::Server(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Message safe to surface to the caller.
    ///
    /// Expected failures keep their message; store and other internal
    /// failures are collapsed to a generic message (the detail is logged
    /// where the error originates).
    pub fn public_message(&self) -> String {
        match self {
            HmsError::Validation(msg)
            | HmsError::Conflict(msg)
            | HmsError::Unauthorized(msg)
            | HmsError::Forbidden(msg)
            | HmsError::NotFound(msg) => msg.clone(),
            HmsError::Jwt(_) => "Invalid or expired token".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for HmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            HmsError::Validation(_) => StatusCode::BAD_REQUEST,
            HmsError::Unauthorized(_) | HmsError::Jwt(_) => StatusCode::UNAUTHORIZED,
            HmsError::Forbidden(_) => StatusCode::FORBIDDEN,
            HmsError::NotFound(_) => StatusCode::NOT_FOUND,
            HmsError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(crate::server::routes::ApiResponse::error(self.public_message()))
    }
}
