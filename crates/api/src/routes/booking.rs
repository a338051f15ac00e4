use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/available-seats",
            get(handlers::booking::available_seats),
        )
        .route("/api/reserve-seat", post(handlers::booking::reserve_seat))
        .route("/api/book-transport", post(handlers::booking::book_seat))
}
