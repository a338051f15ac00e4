use axum::{extract::State, Json};
use std::sync::Arc;
use transitbook_core::{errors::BookingError, models::country::Country};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn countries(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Country>>, AppError> {
    let countries = transitbook_db::repositories::country::list_countries(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(
        countries
            .into_iter()
            .map(|c| Country { id: c.id, name: c.name })
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn destinations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = transitbook_db::repositories::country::country_names(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(names))
}
