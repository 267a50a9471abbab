//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::store::{
    Category, Id, Location, Property, PublicationStatus, Role, ScheduledVisit, User,
    VisitSchedule, VisitStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// AUTH DTOs
// ============================================

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    /// Optional; checked against the 18-year minimum when present
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Opened session: token plus the account and its landing page
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
    /// Role-appropriate dashboard path
    pub dashboard: String,
}

/// Public view of an account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Id,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// ============================================
// CATALOG DTOs
// ============================================

/// Create/update a category
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            active: category.active,
        }
    }
}

/// Category list response
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub total: usize,
    pub categories: Vec<CategoryResponse>,
}

/// Create/update a location
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub city: String,
    #[serde(default)]
    pub city_description: String,
    pub department: String,
    #[serde(default)]
    pub department_description: String,
}

/// Location response
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: Id,
    pub city: String,
    pub city_description: String,
    pub department: String,
    pub department_description: String,
    pub active: bool,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            city: location.city,
            city_description: location.city_description,
            department: location.department,
            department_description: location.department_description,
            active: location.active,
        }
    }
}

/// Location list response
#[derive(Debug, Serialize)]
pub struct LocationListResponse {
    pub total: usize,
    pub locations: Vec<LocationResponse>,
}

/// Query flag shared by catalog listings
#[derive(Debug, Default, Deserialize)]
pub struct CatalogListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

// ============================================
// PROPERTY DTOs
// ============================================

/// Create/update a property
#[derive(Debug, Deserialize)]
pub struct PropertyRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rooms: u8,
    pub baths: u8,
    pub price: u64,
    pub category_id: Id,
    pub location_id: Id,
}

/// Change a property's publication status
#[derive(Debug, Deserialize)]
pub struct PropertyStatusRequest {
    pub status: PublicationStatus,
}

/// Property response
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub rooms: u8,
    pub baths: u8,
    pub price: u64,
    pub category_id: Id,
    pub location_id: Id,
    pub seller_id: Id,
    pub status: PublicationStatus,
    pub active_since: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            rooms: p.rooms,
            baths: p.baths,
            price: p.price,
            category_id: p.category_id,
            location_id: p.location_id,
            seller_id: p.seller_id,
            status: p.status,
            active_since: p.active_since,
        }
    }
}

/// Property list response
#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub total: usize,
    pub properties: Vec<PropertyResponse>,
}

/// Search query for `GET /properties`
#[derive(Debug, Default, Deserialize)]
pub struct PropertySearchQuery {
    #[serde(default)]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub location_id: Option<Id>,
    #[serde(default)]
    pub seller_id: Option<Id>,
    #[serde(default)]
    pub min_price: Option<u64>,
    #[serde(default)]
    pub max_price: Option<u64>,
    #[serde(default)]
    pub min_rooms: Option<u8>,
    #[serde(default)]
    pub status: Option<PublicationStatus>,
    /// price_asc, price_desc or newest
    #[serde(default)]
    pub sort: Option<String>,
}

// ============================================
// VISIT DTOs
// ============================================

/// Publish a visit window
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub property_id: Id,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Defaults to the standard per-window cap when omitted
    #[serde(default)]
    pub slots: Option<u32>,
}

/// Visit window response
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: Id,
    pub seller_id: Id,
    pub property_id: Id,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_slots: u32,
    pub booked: usize,
}

impl From<VisitSchedule> for ScheduleResponse {
    fn from(s: VisitSchedule) -> Self {
        Self {
            id: s.id,
            seller_id: s.seller_id,
            property_id: s.property_id,
            start: s.start,
            end: s.end,
            available_slots: s.available_slots,
            booked: s.visit_ids.len(),
        }
    }
}

/// Visit window list response
#[derive(Debug, Serialize)]
pub struct ScheduleListResponse {
    pub total: usize,
    pub schedules: Vec<ScheduleResponse>,
}

/// Filter query for `GET /visit-schedules`
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleSearchQuery {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location_id: Option<Id>,
    #[serde(default)]
    pub seller_id: Option<Id>,
}

/// Book a slot in a window
#[derive(Debug, Deserialize)]
pub struct BookVisitRequest {
    pub schedule_id: Id,
}

/// Move a visit along its lifecycle
#[derive(Debug, Deserialize)]
pub struct VisitStatusRequest {
    pub status: VisitStatus,
}

/// Visit response
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub id: Id,
    pub schedule_id: Id,
    pub buyer_email: String,
    pub status: VisitStatus,
    pub requested_at: DateTime<Utc>,
}

impl From<ScheduledVisit> for VisitResponse {
    fn from(v: ScheduledVisit) -> Self {
        Self {
            id: v.id,
            schedule_id: v.schedule_id,
            buyer_email: v.buyer_email,
            status: v.status,
            requested_at: v.requested_at,
        }
    }
}

/// Visit list response
#[derive(Debug, Serialize)]
pub struct VisitListResponse {
    pub total: usize,
    pub visits: Vec<VisitResponse>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub uptime_seconds: u64,
    pub version: String,
}
