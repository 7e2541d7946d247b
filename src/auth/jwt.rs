//! JWT token handling
//!
//! Tokens are stateless bearer credentials: validity is entirely signature
//! plus expiry at verification time, with no server-side session record.

use crate::config::AuthConfig;
use crate::core::models::Account;
use crate::utils::error::{HmsError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// Token issuer embedded in every claim set
const ISSUER: &str = "hms-auth";

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token lifetime in seconds
    expiration: u64,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: Uuid,
    /// Email address
    pub email: String,
    /// Access role
    pub role: String,
    /// First name (denormalized for the dashboard)
    pub first_name: String,
    /// Last name (denormalized for the dashboard)
    pub last_name: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
        }
    }

    /// Create an access token for an account
    pub fn create_access_token(&self, account: &Account) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| HmsError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role.to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            iat: now,
            exp: now + self.expiration,
            iss: ISSUER.to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(HmsError::Jwt)?;

        debug!("Created access token for account: {}", account.id);
        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            HmsError::Jwt(e)
        })?;

        debug!("Token verified for account: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Extract a bearer token from an Authorization header value
    pub fn extract_token_from_header(header_value: &str) -> Option<String> {
        header_value
            .strip_prefix("Bearer ")
            .map(|token| token.to_string())
    }

    /// Get the configured token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}
