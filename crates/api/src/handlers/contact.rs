//! # Contact Handlers
//!
//! Support contact form. Validates the sender's details and writes the
//! message to the log, which stands in for forwarding it to a support inbox.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;
use transitbook_core::{
    errors::BookingError,
    models::account::{self, ContactRequest, ContactResponse},
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn contact(
    State(_state): State<Arc<ApiState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let (Some(name), Some(email), Some(mobile), Some(message)) = (
        payload.name.filter(|v| !v.is_empty()),
        payload.email.filter(|v| !v.is_empty()),
        payload.mobile.filter(|v| !v.is_empty()),
        payload.message.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError(BookingError::Validation(
            "Please fill all fields".to_string(),
        )));
    };

    if !account::valid_email(&email) {
        return Err(AppError(BookingError::Validation(
            "Invalid email format".to_string(),
        )));
    }

    if !account::valid_mobile(&mobile) {
        return Err(AppError(BookingError::Validation(
            "Invalid mobile number. Must be 10 digits.".to_string(),
        )));
    }

    info!(
        "Support request from {} <{}> ({}): {}",
        name, email, mobile, message
    );

    Ok(Json(ContactResponse {
        message: "Message sent successfully!".to_string(),
    }))
}
