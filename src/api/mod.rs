//! Inmomarket REST API
//!
//! HTTP API layer for the marketplace, built with Axum.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/v1/auth/register` - Create an account and open a session
//! - `POST /api/v1/auth/login` - Open a session
//!
//! ## Users
//! - `GET /api/v1/users/me` - The authenticated account
//!
//! ## Catalog (writes admin-only)
//! - `GET|POST /api/v1/categories`, `GET|PUT|DELETE /api/v1/categories/:id`
//! - `GET|POST /api/v1/locations`, `GET|PUT|DELETE /api/v1/locations/:id`
//!
//! ## Properties (writes seller-only)
//! - `GET /api/v1/properties` - Search listings
//! - `POST /api/v1/properties` - List a property
//! - `GET|PUT|DELETE /api/v1/properties/:id`
//! - `PUT /api/v1/properties/:id/status` - Publication status
//!
//! ## Visits
//! - `GET /api/v1/visit-schedules` - Available windows
//! - `POST /api/v1/visit-schedules` - Publish a window (seller)
//! - `GET /api/v1/visit-schedules/mine` - Seller's windows
//! - `GET /api/v1/visit-schedules/:id`, `GET /api/v1/visit-schedules/:id/visits`
//! - `POST /api/v1/visits` - Book a slot (buyer)
//! - `GET /api/v1/visits/mine` - Buyer's bookings
//! - `PUT /api/v1/visits/:id/status`, `DELETE /api/v1/visits/:id`
//!
//! ## Health
//! - `GET /health/live`, `GET /health/ready`, `GET /health`
//!
//! # Example
//!
//! ```rust,ignore
//! use inmomarket::api::{serve, ApiConfig, AppState};
//! use inmomarket::auth::TokenKeys;
//! use inmomarket::store::MarketStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MarketStore::in_memory());
//!     let config = ApiConfig::default();
//!     let keys = TokenKeys::new("secret", 24);
//!
//!     let state = AppState::new(store, keys, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        // User routes
        .route("/users/me", get(routes::users::me))
        // Category routes
        .route("/categories", get(routes::categories::list_categories))
        .route("/categories", post(routes::categories::create_category))
        .route("/categories/:id", get(routes::categories::get_category))
        .route("/categories/:id", put(routes::categories::update_category))
        .route("/categories/:id", delete(routes::categories::delete_category))
        // Location routes
        .route("/locations", get(routes::locations::list_locations))
        .route("/locations", post(routes::locations::create_location))
        .route("/locations/:id", get(routes::locations::get_location))
        .route("/locations/:id", put(routes::locations::update_location))
        .route("/locations/:id", delete(routes::locations::delete_location))
        // Property routes
        .route("/properties", get(routes::properties::search_properties))
        .route("/properties", post(routes::properties::create_property))
        .route("/properties/:id", get(routes::properties::get_property))
        .route("/properties/:id", put(routes::properties::update_property))
        .route("/properties/:id", delete(routes::properties::delete_property))
        .route("/properties/:id/status", put(routes::properties::set_property_status))
        // Visit schedule routes
        .route("/visit-schedules", get(routes::schedules::available_schedules))
        .route("/visit-schedules", post(routes::schedules::create_schedule))
        .route("/visit-schedules/mine", get(routes::schedules::my_schedules))
        .route("/visit-schedules/:id", get(routes::schedules::get_schedule))
        .route("/visit-schedules/:id/visits", get(routes::schedules::schedule_visits))
        // Visit routes
        .route("/visits", post(routes::visits::book_visit))
        .route("/visits/mine", get(routes::visits::my_visits))
        .route("/visits/:id/status", put(routes::visits::update_visit_status))
        .route("/visits/:id", delete(routes::visits::cancel_visit));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Internal(format!("Bind error: {}", e)))?;

    tracing::info!("Inmomarket API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Inmomarket API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
