//! # Account Handlers
//!
//! Passenger registration and profile lookups. Registration attaches travel
//! details to an existing signup; the profile is what makes an account a
//! passenger the booking report can name.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use transitbook_core::{
    errors::BookingError,
    models::account::{
        RegisterRequest, RegisterResponse, UserDetailsRequest, UserDetailsResponse,
        UserNameResponse,
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let (Some(email), Some(mobile_number)) = (
        payload.email.filter(|v| !v.is_empty()),
        payload.mobile_number.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError(BookingError::Validation(
            "Email and mobile number are required".to_string(),
        )));
    };

    // Registration requires a prior signup
    let account = transitbook_db::repositories::account::get_account_by_email(&state.db_pool, &email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::Validation("Email not found. Please sign up first.".to_string())
        })?;

    transitbook_db::repositories::account::create_profile(
        &state.db_pool,
        account.id,
        payload.age,
        payload.date_of_birth,
        payload.gender.as_deref(),
        payload.address.as_deref(),
        &mobile_number,
        payload.country.as_deref(),
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| BookingError::Validation("User is already registered.".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user_id: account.id,
        }),
    ))
}

#[axum::debug_handler]
pub async fn user_details(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UserDetailsRequest>,
) -> Result<Json<UserDetailsResponse>, AppError> {
    let Some(email) = payload.email.filter(|v| !v.is_empty()) else {
        return Err(AppError(BookingError::Validation(
            "Email is required".to_string(),
        )));
    };

    let details = transitbook_db::repositories::account::user_details_by_email(&state.db_pool, &email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound("User not found".to_string()))?;

    Ok(Json(UserDetailsResponse {
        email: details.email,
        first_name: details.first_name,
        last_name: details.last_name,
        age: details.age,
        gender: details.gender,
        address: details.address,
        mobile_number: details.mobile_number,
        country: details.country,
        user_id: details.user_id,
    }))
}

#[axum::debug_handler]
pub async fn user_name(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserNameResponse>, AppError> {
    let full_name =
        transitbook_db::repositories::account::profile_name_by_user_id(&state.db_pool, user_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| BookingError::NotFound("User not found".to_string()))?;

    Ok(Json(UserNameResponse { full_name }))
}
