use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/countries", get(handlers::country::countries))
        .route("/api/destinations", get(handlers::country::destinations))
}
