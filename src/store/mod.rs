//! Inmomarket persistence layer
//!
//! This module provides the simulated persistence the marketplace runs on:
//!
//! - **types**: Record types (User, Category, Location, Property, visit records)
//! - **engine**: In-memory collections with JSON snapshot round-tripping
//! - **error**: Error types
//!
//! There is no database behind this layer. Every collection is a Vec behind
//! an async RwLock; references between records are plain ids resolved by
//! linear scan at read time, and services own all referential checks.
//!
//! # Example
//!
//! ```rust,no_run
//! use inmomarket::store::{MarketStore, StoreConfig, Category};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MarketStore::new(StoreConfig::new("./data"));
//!     store.load_snapshots().await?;
//!
//!     let casa = store
//!         .categories()
//!         .insert(|id| Category {
//!             id,
//!             name: "Casa".to_string(),
//!             description: "Single-family homes".to_string(),
//!             active: true,
//!         })
//!         .await;
//!
//!     println!("registered category {}", casa.id);
//!     store.save_snapshots().await?;
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use engine::{Collection, MarketStore, StoreConfig, StoreStats};
pub use error::{StoreError, StoreResult};
pub use types::{
    Category, Entity, Id, Location, Property, PublicationStatus, Role, ScheduledVisit, User,
    VisitSchedule, VisitStatus,
};
