use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/register", post(handlers::account::register))
        .route("/user-details", post(handlers::account::user_details))
        .route("/api/user/:id", get(handlers::account::user_name))
}
