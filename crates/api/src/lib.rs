//! # TransitBook API
//!
//! The API crate provides the web server implementation for the TransitBook
//! seat booking service. It defines RESTful endpoints for accounts, passenger
//! registration, seat reservation and booking, destinations, and reports.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.
//!
//! ## Seat lifecycle
//!
//! A seat is first *reserved*, which places a short-lived hold, and then
//! *booked*, which makes it permanent. Holds lapse on their own once their
//! deadline passes; reads ignore lapsed holds and the next reservation for
//! the same seat simply takes the row over. An optional background sweeper
//! deletes lapsed rows to keep the table small.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Secret key for signing login and password reset tokens
    pub jwt_secret: Option<String>,

    /// How long a seat hold lasts before it lapses, in seconds
    pub seat_hold_seconds: i64,

    /// Base URL password reset links point at
    pub frontend_base_url: String,
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes the application, sets up logging, configures routes,
/// spawns the optional hold sweeper, and starts the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool: db_pool.clone(),
        jwt_secret: config.jwt_secret.clone(),
        seat_hold_seconds: config.seat_hold_seconds,
        frontend_base_url: config.frontend_base_url.clone(),
    });

    // Expired holds are already invisible to every read; the sweeper only
    // reclaims the rows they leave behind.
    if let Some(interval_seconds) = config.hold_sweep_interval {
        let sweep_pool = db_pool.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(interval_seconds));
            loop {
                interval.tick().await;
                match transitbook_db::repositories::booking::delete_expired_holds(
                    &sweep_pool,
                    Utc::now(),
                )
                .await
                {
                    Ok(swept) if swept > 0 => info!("Hold sweeper removed {} lapsed holds", swept),
                    Ok(_) => {}
                    Err(e) => warn!("Hold sweeper failed: {}", e),
                }
            }
        });
        info!("Hold sweeper running every {}s", interval_seconds);
    }

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Signup, login, and password reset endpoints
        .merge(routes::auth::routes())
        // Passenger registration and profile endpoints
        .merge(routes::account::routes())
        // Seat availability, reservation, and booking endpoints
        .merge(routes::booking::routes())
        // Country and destination endpoints
        .merge(routes::country::routes())
        // Booking report endpoints
        .merge(routes::report::routes())
        // Support contact endpoints
        .merge(routes::contact::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                |_: tower::BoxError| async { axum::http::StatusCode::REQUEST_TIMEOUT },
            ))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
