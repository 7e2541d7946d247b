//! Authentication and authorization
//!
//! Credential verification, token issuance/validation and role-gated access.
//! The storage layer is injected; the component holds no global state.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::Claims;
pub use rbac::authorize_role;

use crate::config::AuthConfig;
use crate::core::models::{Account, NewAccount};
use crate::storage::StorageLayer;
use crate::utils::error::{HmsError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    /// Storage layer for account data
    storage: Arc<StorageLayer>,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        info!("Initializing authentication service");

        let jwt = Arc::new(jwt::JwtHandler::new(config));

        Self { storage, jwt }
    }

    /// Register a new account and issue a token for it.
    ///
    /// Validates input before any store call, fails with `Conflict` when the
    /// email is already registered, and persists the account with a salted
    /// Argon2 hash.
    pub async fn register(&self, input: NewAccount) -> Result<(Account, String)> {
        let account = self.create_account(input).await?;
        let token = self.jwt.create_access_token(&account)?;

        info!("Account registered: {}", account.id);
        Ok((account, token))
    }

    /// Create an account without issuing a token.
    ///
    /// Shared by registration and the admin user controller.
    pub async fn create_account(&self, mut input: NewAccount) -> Result<Account> {
        DataValidator::validate_email(&input.email)?;
        DataValidator::validate_password(&input.password)?;
        DataValidator::validate_name(&input.first_name, "First name")?;
        DataValidator::validate_name(&input.last_name, "Last name")?;

        input.email = DataValidator::normalize_email(&input.email);

        // Lookup-then-insert; the store's unique email column bounds the
        // race between two concurrent registrations of the same address.
        if self
            .storage
            .db()
            .find_account_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(HmsError::conflict("User already exists with this email"));
        }

        let password_hash = password::hash_password(&input.password)?;
        let account = Account::new(&input, password_hash);

        self.storage.db().create_account(&account).await
    }

    /// Verify credentials and issue a token.
    ///
    /// A missing account, an inactive account and a wrong password all
    /// surface as the same `Unauthorized` result.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Account, String)> {
        let email = DataValidator::normalize_email(email);
        debug!("Login attempt");

        let mut account = self
            .storage
            .db()
            .find_account_by_email(&email)
            .await?
            .ok_or_else(|| HmsError::unauthorized("Invalid credentials"))?;

        if !account.is_active {
            warn!("Login attempt for inactive account: {}", account.id);
            return Err(HmsError::unauthorized("Invalid credentials"));
        }

        if !password::verify_password(password, &account.password_hash)? {
            warn!("Login attempt with invalid password for account: {}", account.id);
            return Err(HmsError::unauthorized("Invalid credentials"));
        }

        self.storage.db().update_last_login(account.id).await?;
        account.last_login_at = Some(chrono::Utc::now());

        let token = self.jwt.create_access_token(&account)?;

        info!("Account logged in: {}", account.id);
        Ok((account, token))
    }

    /// Verify a token and return its claims.
    ///
    /// Pure signature + expiry check; the claims are trusted as of issuance
    /// time and no store lookup is performed.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.jwt
            .verify_token(token)
            .map_err(|_| HmsError::unauthorized("Invalid or expired token"))
    }

    /// Fetch the account behind an authenticated caller
    pub async fn profile(&self, account_id: Uuid) -> Result<Account> {
        self.storage
            .db()
            .find_account_by_id(account_id)
            .await?
            .ok_or_else(|| HmsError::not_found("Account not found"))
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }
}
