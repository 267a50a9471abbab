//! # Inmomarket
//!
//! A real-estate marketplace service: property catalog, listings, and visit
//! scheduling with role-based access for administrators, sellers and buyers.
//!
//! ## Features
//!
//! - **In-memory store**: Injected collections with JSON snapshot round-trips
//! - **Catalog**: Categories and locations with normalized uniqueness and soft deletes
//! - **Listings**: Seller-owned properties with publication status and search
//! - **Visits**: Seller-published windows with enforced booking capacity
//! - **Roles**: Signed session tokens and per-route role guards
//!
//! ## Modules
//!
//! - [`store`]: Record types and the in-memory market store
//! - [`catalog`]: Category and location services
//! - [`listings`]: Property listing service
//! - [`visits`]: Visit window and booking service
//! - [`auth`]: Accounts, session tokens and the route guard
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inmomarket::store::{MarketStore, Role};
//! use inmomarket::auth::{AuthService, NewAccount, TokenKeys};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MarketStore::in_memory());
//!     let auth = AuthService::new(Arc::clone(&store), TokenKeys::new("secret", 24));
//!
//!     let (seller, token) = auth
//!         .register(NewAccount {
//!             email: "vendedor@example.com".to_string(),
//!             password: "Secreto123".to_string(),
//!             full_name: "Vendedor Uno".to_string(),
//!             phone: "3001234567".to_string(),
//!             role: Role::Seller,
//!             birth_date: None,
//!         })
//!         .await?;
//!
//!     println!("seller {} landed on {}", seller.id, seller.role.dashboard_path());
//!     let _ = token;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod listings;
pub mod store;
pub mod validate;
pub mod visits;

// Re-export top-level types for convenience
pub use store::{
    Category, Id, Location, MarketStore, Property, PublicationStatus, Role, ScheduledVisit,
    StoreConfig, StoreError, StoreResult, StoreStats, User, VisitSchedule, VisitStatus,
};

pub use catalog::{CatalogError, CatalogResult, CatalogService};

pub use listings::{
    ListingError, ListingResult, ListingService, PropertyDraft, PropertyFilter, PropertySort,
};

pub use visits::{
    ScheduleFilter, VisitError, VisitResult, VisitService, DEFAULT_VISIT_SLOTS,
};

pub use auth::{
    authorize, AuthError, AuthResult, AuthService, AuthUser, GuardError, NewAccount, TokenKeys,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, LoggingConfig, ApiConfig as ConfigApiConfig,
    AuthConfig as ConfigAuthConfig, StoreConfig as ConfigStoreConfig,
};

pub use validate::{ValidationError, ValidationResult};
