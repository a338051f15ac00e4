//! # Authentication Module
//!
//! This module provides authentication-related utilities for the TransitBook API:
//! password hashing and verification for accounts, and the signed tokens used
//! for login sessions and password resets.
//!
//! Password hashing uses Argon2, a secure password hashing algorithm, to
//! protect user passwords from common attacks like rainbow tables and brute
//! force attempts. Tokens are stateless JWTs signed with the server secret,
//! so a reset link proves itself without a token table.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use chrono::{Duration, Utc};
use eyre::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use transitbook_core::errors::{BookingError, BookingResult};

/// Lifetime of login and password reset tokens.
const TOKEN_TTL_SECONDS: i64 = 3600;

/// Claims carried by a login token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginClaims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub exp: usize,
}

/// Claims carried by a password reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub email: String,
    pub exp: usize,
}

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Example
///
/// ```
/// use transitbook_api::middleware::auth::hash_password;
///
/// let hashed = hash_password("user_password").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
///
/// # Security Notes
///
/// - Uses a random salt for each password
/// - Uses default Argon2 parameters (memory: 19MiB, iterations: 3, parallelism: 4)
/// - Returns password in PHC string format (includes algorithm, version, parameters, salt, and hash)
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored hash
///
/// # Example
///
/// ```
/// use transitbook_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("user_password").unwrap();
/// assert!(verify_password("user_password", &hashed).unwrap());
/// assert!(!verify_password("wrong_password", &hashed).unwrap());
/// ```
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(is_valid)
}

/// Signs a login token for an authenticated account.
pub fn issue_login_token(secret: &str, user_id: i32) -> BookingResult<String> {
    let claims = LoginClaims {
        user_id,
        exp: (Utc::now() + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// Signs a password reset token bound to an email address.
pub fn issue_reset_token(secret: &str, email: &str) -> BookingResult<String> {
    let claims = ResetClaims {
        email: email.to_string(),
        exp: (Utc::now() + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// Validates a reset token and returns the email it was issued for.
/// Expired and tampered tokens both surface as a validation error.
pub fn verify_reset_token(secret: &str, token: &str) -> BookingResult<String> {
    let data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| BookingError::Validation("Invalid or expired token".to_string()))?;

    Ok(data.claims.email)
}

/// The signing secret, or an internal error when the server was started
/// without one.
pub fn require_secret(jwt_secret: Option<&str>) -> BookingResult<&str> {
    jwt_secret.ok_or_else(|| BookingError::Internal("JWT_SECRET is not configured".into()))
}
