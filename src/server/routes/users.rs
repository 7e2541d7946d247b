//! User management endpoints
//!
//! Admin-only account administration: creation with an arbitrary role,
//! lookup, listing and the active/inactive toggle.

use crate::core::models::{NewAccount, Role};
use crate::server::middleware::helpers::require_role;
use crate::server::routes::auth::AccountResponse;
use crate::server::routes::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::server::AppState;
use crate::utils::error::HmsError;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result as ActixResult};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure user management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}/status", web::put().to(update_user_status)),
    );
}

/// User creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Active-flag update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

/// Create a user with any role (admin only)
async fn create_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::ADMIN_ONLY) {
        return Ok(e.error_response());
    }

    info!("User creation requested");

    let request = request.into_inner();
    let input = NewAccount {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role,
    };

    match state.auth.create_account(input).await {
        Ok(account) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            AccountResponse::from(account),
            "User created successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

/// List users, newest first (admin only)
async fn list_users(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::ADMIN_ONLY) {
        return Ok(e.error_response());
    }

    if let Err(msg) = query.validate() {
        return Ok(HmsError::validation(msg).error_response());
    }

    debug!("Listing users page={} limit={}", query.page, query.limit);

    match state
        .storage
        .db()
        .list_accounts(query.offset(), u64::from(query.limit))
        .await
    {
        Ok((accounts, total)) => {
            let items: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            let data = PaginatedResponse::new(items, query.page, query.limit, total);

            Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Get a user by ID (admin only)
async fn get_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<uuid::Uuid>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::ADMIN_ONLY) {
        return Ok(e.error_response());
    }

    let user_id = path.into_inner();
    debug!("Fetching user: {}", user_id);

    match state.storage.db().find_account_by_id(user_id).await {
        Ok(Some(account)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccountResponse::from(account),
        ))),
        Ok(None) => Ok(HmsError::not_found("User not found").error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

/// Toggle the active flag on an account (admin only)
///
/// Deactivated accounts are excluded from future logins; existing tokens
/// remain valid until they expire (no revocation list).
async fn update_user_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<uuid::Uuid>,
    request: web::Json<UpdateStatusRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(e) = require_role(&req, Role::ADMIN_ONLY) {
        return Ok(e.error_response());
    }

    let user_id = path.into_inner();
    info!("Setting user {} active = {}", user_id, request.is_active);

    match state
        .storage
        .db()
        .set_account_active(user_id, request.is_active)
        .await
    {
        Ok(account) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            AccountResponse::from(account),
            "User status updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}
