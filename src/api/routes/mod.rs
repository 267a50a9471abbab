//! API Route Handlers
//!
//! Each submodule handles one resource of the marketplace API.

pub mod auth;
pub mod categories;
pub mod health;
pub mod locations;
pub mod properties;
pub mod schedules;
pub mod users;
pub mod visits;
