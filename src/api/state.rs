//! Application State
//!
//! Shared state accessible by all API handlers: the market store plus the
//! services injected over it. Wrapped in Arc for thread-safe sharing across
//! async tasks.

use crate::api::error::ApiError;
use crate::auth::{self, AuthService, AuthUser, TokenKeys};
use crate::catalog::CatalogService;
use crate::listings::ListingService;
use crate::store::MarketStore;
use crate::visits::VisitService;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The injected persistence container
    pub store: Arc<MarketStore>,
    /// Accounts and sessions
    pub auth: AuthService,
    /// Categories and locations
    pub catalog: CatalogService,
    /// Property listings
    pub listings: ListingService,
    /// Visit windows and bookings
    pub visits: VisitService,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Wire every service over one store
    pub fn new(store: Arc<MarketStore>, keys: TokenKeys, config: ApiConfig) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&store), keys),
            catalog: CatalogService::new(Arc::clone(&store)),
            listings: ListingService::new(Arc::clone(&store)),
            visits: VisitService::new(Arc::clone(&store)),
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Bearer-token extractor: any handler taking [`AuthUser`] is a guarded
/// route; role requirements are checked inside the handler
#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        Ok(auth::authorize(header, state.auth.keys())?)
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_ms: 30_000,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
