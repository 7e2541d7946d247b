//! Authentication endpoints
//!
//! Registration, login, token verification and profile lookup. The wire
//! format matches the dashboard client: camelCase request/response fields,
//! `access_token`/`expires_in` in the token payload.

use crate::auth::jwt::Claims;
use crate::core::models::{Account, NewAccount, Role};
use crate::server::middleware::helpers::claims_from_request;
use crate::server::routes::ApiResponse;
use crate::server::AppState;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/verify-token", web::post().to(verify_token))
            .route("/profile", web::get().to(profile)),
    );
}

/// Registration request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Login request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account payload (without sensitive data)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Token issuance payload
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: AccountResponse,
    pub access_token: String,
    pub expires_in: u64,
}

/// Claims payload returned by token verification
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for VerifiedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

/// Token verification payload
#[derive(Debug, Serialize)]
pub struct VerifyTokenData {
    pub valid: bool,
    pub user: VerifiedUser,
}

/// Account registration endpoint
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    info!("Registration attempt");

    let request = request.into_inner();
    let input = NewAccount {
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role,
    };

    match state.auth.register(input).await {
        Ok((account, access_token)) => {
            let data = AuthData {
                user: account.into(),
                access_token,
                expires_in: state.auth.jwt().expiration(),
            };

            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
                data,
                "User registered successfully",
            )))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Login endpoint
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    info!("Login attempt");

    match state.auth.login(&request.email, &request.password).await {
        Ok((account, access_token)) => {
            let data = AuthData {
                user: account.into(),
                access_token,
                expires_in: state.auth.jwt().expiration(),
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, "Login successful")))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Token verification endpoint
///
/// The auth middleware has already verified the bearer token; the claims it
/// attached are echoed back without a store lookup.
async fn verify_token(req: HttpRequest) -> ActixResult<HttpResponse> {
    debug!("Token verification request");

    match claims_from_request(&req) {
        Ok(claims) => {
            let data = VerifyTokenData {
                valid: true,
                user: claims.into(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, "Token is valid")))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Profile endpoint for the authenticated account
async fn profile(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    debug!("Profile request");

    let claims = match claims_from_request(&req) {
        Ok(claims) => claims,
        Err(e) => return Ok(e.error_response()),
    };

    match state.auth.profile(claims.sub).await {
        Ok(account) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            AccountResponse::from(account),
            "Profile retrieved successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}
