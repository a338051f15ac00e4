use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use transitbook_core::{
    errors::BookingError,
    models::report::{ReportRequest, ReportRow},
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn report(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<Vec<ReportRow>>, AppError> {
    let (Some(start_date), Some(end_date)) = (payload.start_date, payload.end_date) else {
        return Err(AppError(BookingError::Validation(
            "Missing required parameters.".to_string(),
        )));
    };

    if end_date < start_date {
        return Err(AppError(BookingError::Validation(
            "End date must not be before start date".to_string(),
        )));
    }

    let rows = transitbook_db::repositories::booking::bookings_between(
        &state.db_pool,
        start_date,
        end_date,
        Utc::now(),
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(
        rows.into_iter()
            .map(|row| ReportRow {
                id: row.id,
                full_name: row.full_name,
                seat_number: row.seat_number,
                destination: row.destination,
                travel_date: row.travel_date,
            })
            .collect(),
    ))
}
