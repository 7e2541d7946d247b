//! Role-based access control
//!
//! The role gate is a pure predicate over token claims: an endpoint declares
//! the roles it admits and the gate answers membership. Unrecognized role
//! strings deny access.

use crate::auth::jwt::Claims;
use crate::core::models::Role;
use std::str::FromStr;

/// Check whether the claims' role is a member of the allowed set.
///
/// Fails closed: a role string that does not parse to a recognized role
/// denies access.
pub fn authorize_role(claims: &Claims, allowed_roles: &[Role]) -> bool {
    match Role::from_str(&claims.role) {
        Ok(role) => allowed_roles.contains(&role),
        Err(_) => false,
    }
}
