//! # Auth Handlers
//!
//! Signup, login, and the password reset pair. Login issues a short-lived
//! JWT; forgot-password issues a reset JWT bound to the account email and
//! writes the reset link to the log, which stands in for mail delivery.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;
use transitbook_core::{
    errors::BookingError,
    models::account::{
        ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
        ResetPasswordRequest, ResetPasswordResponse, SignupRequest, SignupResponse,
    },
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        payload.first_name.filter(|v| !v.is_empty()),
        payload.last_name.filter(|v| !v.is_empty()),
        payload.email.filter(|v| !v.is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError(BookingError::Validation(
            "All fields are required".to_string(),
        )));
    };

    let password_hash = auth::hash_password(&password)?;

    transitbook_db::repositories::account::create_account(
        &state.db_pool,
        &first_name,
        &last_name,
        &email,
        &password_hash,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| BookingError::Validation("Email is already registered".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User signed up successfully".to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|v| !v.is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError(BookingError::Validation(
            "Email and password are required".to_string(),
        )));
    };

    let account = transitbook_db::repositories::account::get_account_by_email(&state.db_pool, &email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound("User not found".to_string()))?;

    let password_matches = auth::verify_password(&password, &account.password_hash)?;
    if !password_matches {
        return Err(AppError(BookingError::Authentication(
            "Invalid credentials".to_string(),
        )));
    }

    let secret = auth::require_secret(state.jwt_secret.as_deref())?;
    let token = auth::issue_login_token(secret, account.id)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

#[axum::debug_handler]
pub async fn forgot_password(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AppError> {
    let Some(email) = payload.email.filter(|v| !v.is_empty()) else {
        return Err(AppError(BookingError::Validation(
            "Email is required".to_string(),
        )));
    };

    let account = transitbook_db::repositories::account::get_account_by_email(&state.db_pool, &email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound("Email not found".to_string()))?;

    let secret = auth::require_secret(state.jwt_secret.as_deref())?;
    let token = auth::issue_reset_token(secret, &account.email)?;
    let reset_link = format!("{}/reset-password/{}", state.frontend_base_url, token);

    // Stands in for the mail transport.
    info!("Password reset link for {}: {}", account.email, reset_link);

    Ok(Json(ForgotPasswordResponse {
        message: "Password reset link sent to your email".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>, AppError> {
    let (Some(token), Some(password)) = (
        payload.token.filter(|v| !v.is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError(BookingError::Validation(
            "Token and password are required".to_string(),
        )));
    };

    let secret = auth::require_secret(state.jwt_secret.as_deref())?;
    let email = auth::verify_reset_token(secret, &token)?;

    let password_hash = auth::hash_password(&password)?;
    let updated =
        transitbook_db::repositories::account::update_password(&state.db_pool, &email, &password_hash)
            .await
            .map_err(BookingError::Database)?;

    if !updated {
        return Err(AppError(BookingError::NotFound("Email not found".to_string())));
    }

    Ok(Json(ResetPasswordResponse {
        message: "Password reset successful".to_string(),
        success: true,
    }))
}
