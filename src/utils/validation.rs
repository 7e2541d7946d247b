//! Request input validation
//!
//! Validators run before any store call; a failure short-circuits the
//! request with a `Validation` error.

use crate::utils::error::{HmsError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only; deliverability is not our concern.
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Input validation utilities
pub struct DataValidator;

impl DataValidator {
    /// Validate an email address syntactically
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(HmsError::validation("Email cannot be empty"));
        }

        if email.len() > 254 {
            return Err(HmsError::validation("Email cannot exceed 254 characters"));
        }

        if !email_regex().is_match(email) {
            return Err(HmsError::validation("Email address is not valid"));
        }

        Ok(())
    }

    /// Validate a password
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(HmsError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(HmsError::validation(format!(
                "Password cannot exceed {} characters",
                MAX_PASSWORD_LENGTH
            )));
        }

        Ok(())
    }

    /// Validate a person name (first or last)
    pub fn validate_name(name: &str, field: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(HmsError::validation(format!("{} cannot be empty", field)));
        }

        if name.len() > 100 {
            return Err(HmsError::validation(format!(
                "{} cannot exceed 100 characters",
                field
            )));
        }

        Ok(())
    }

    /// Normalize an email for storage and comparison.
    ///
    /// Emails are compared case-insensitively; the canonical form is
    /// lowercase with surrounding whitespace removed.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
