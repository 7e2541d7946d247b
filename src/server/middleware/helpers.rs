//! Helper functions for middleware and role-gated handlers

use crate::auth::jwt::{Claims, JwtHandler};
use crate::auth::rbac::authorize_role;
use crate::core::models::Role;
use crate::utils::error::{HmsError, Result};
use actix_web::http::header::HeaderMap;
use actix_web::{HttpMessage, HttpRequest};

/// Extract a bearer token from request headers
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(JwtHandler::extract_token_from_header)
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_PREFIXES: &[&str] = &["/health", "/version", "/auth/login", "/auth/register"];

    path == "/" || PUBLIC_PREFIXES.iter().any(|&route| path.starts_with(route))
}

/// Get the verified claims the auth middleware attached to the request
pub fn claims_from_request(req: &HttpRequest) -> Result<Claims> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| HmsError::unauthorized("Authentication required"))
}

/// Get verified claims and enforce an endpoint's role allow-list
pub fn require_role(req: &HttpRequest, allowed_roles: &[Role]) -> Result<Claims> {
    let claims = claims_from_request(req)?;

    if !authorize_role(&claims, allowed_roles) {
        return Err(HmsError::forbidden(
            "You do not have permission to access this resource",
        ));
    }

    Ok(claims)
}
