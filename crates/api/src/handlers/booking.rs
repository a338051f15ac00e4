//! # Booking Handlers
//!
//! This module contains handlers for the seat lifecycle: listing free seats
//! for a trip, placing a short-lived hold on one, and confirming the hold
//! into a permanent booking.
//!
//! ## Hold-then-book protocol
//!
//! A trip is identified by travel date, departure slot, and destination.
//! Reserving writes a `reserved` row carrying a deadline; booking promotes
//! that row to `booked` and clears the deadline. All races resolve inside
//! single SQL statements:
//!
//! 1. Reserving inserts against the unique seat constraint, taking over the
//!    existing row only when it is a hold that has already lapsed. Losing
//!    the race reports the seat as unavailable.
//! 2. Booking updates only a live hold owned by the caller. Anything else
//!    reports the seat as not reserved.
//!
//! Lapsed holds are never consulted by reads, so expiry needs no timer: a
//! hold stops mattering the moment its deadline passes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use transitbook_core::{
    errors::BookingError,
    models::booking::{
        self, AvailableSeatsQuery, BookSeatRequest, BookSeatResponse, Departure,
        ReserveSeatRequest, ReserveSeatResponse,
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn available_seats(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableSeatsQuery>,
) -> Result<Json<Vec<i32>>, AppError> {
    let (Some(travel_date), Some(departure), Some(destination)) =
        (query.travel_date, query.departure, query.destination)
    else {
        return Err(AppError(BookingError::Validation(
            "Missing required parameters".to_string(),
        )));
    };
    let departure: Departure = departure.parse()?;

    let now = Utc::now();
    let occupied = transitbook_db::repositories::booking::active_seat_numbers(
        &state.db_pool,
        travel_date,
        departure.as_str(),
        &destination,
        now,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(booking::available_seats(&occupied)))
}

#[axum::debug_handler]
pub async fn reserve_seat(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReserveSeatRequest>,
) -> Result<Json<ReserveSeatResponse>, AppError> {
    let (Some(seat_number), Some(travel_date), Some(departure), Some(destination), Some(user_id)) = (
        payload.seat_number,
        payload.travel_date,
        payload.departure,
        payload.destination,
        payload.user_id,
    ) else {
        return Err(AppError(BookingError::Validation(
            "Missing required fields".to_string(),
        )));
    };
    let departure: Departure = departure.parse()?;

    if !booking::valid_seat(seat_number) {
        return Err(AppError(BookingError::Validation(format!(
            "Seat number must be between 1 and {}",
            booking::TOTAL_SEATS
        ))));
    }

    let now = Utc::now();
    let reserved_until = hold_deadline(now, travel_date, departure, state.seat_hold_seconds)?;

    let reserved = transitbook_db::repositories::booking::reserve_seat(
        &state.db_pool,
        user_id,
        seat_number,
        travel_date,
        departure.as_str(),
        &destination,
        reserved_until,
        now,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::SeatUnavailable(format!("Seat {} is already taken", seat_number))
    })?;

    Ok(Json(ReserveSeatResponse {
        message: "Seat reserved successfully".to_string(),
        reserved_until: reserved
            .reserved_until
            .unwrap_or(reserved_until),
    }))
}

#[axum::debug_handler]
pub async fn book_seat(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookSeatRequest>,
) -> Result<(StatusCode, Json<BookSeatResponse>), AppError> {
    let (Some(user_id), Some(seat_number), Some(travel_date), Some(departure), Some(destination)) = (
        payload.user_id,
        payload.seat_number,
        payload.travel_date,
        payload.departure,
        payload.destination,
    ) else {
        return Err(AppError(BookingError::Validation(
            "Missing required fields".to_string(),
        )));
    };
    let departure: Departure = departure.parse()?;

    let now = Utc::now();
    transitbook_db::repositories::booking::confirm_seat(
        &state.db_pool,
        user_id,
        seat_number,
        travel_date,
        departure.as_str(),
        &destination,
        now,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::SeatNotReserved("Seat is not reserved or already booked".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(BookSeatResponse {
            message: "Seat booked successfully".to_string(),
        }),
    ))
}

/// Deadline for a hold placed now. Rejects trips that have already left.
fn hold_deadline(
    now: chrono::DateTime<Utc>,
    travel_date: NaiveDate,
    departure: Departure,
    hold_seconds: i64,
) -> Result<chrono::DateTime<Utc>, BookingError> {
    booking::hold_expiry(now, travel_date, departure, hold_seconds).ok_or_else(|| {
        BookingError::Validation("Cannot reserve a seat on a trip that has already departed".to_string())
    })
}
