//! Core record types for the Inmomarket store
//!
//! This module defines the entities the marketplace operates on:
//! - `User`: an account with a marketplace role
//! - `Category` and `Location`: the catalog a property is classified under
//! - `Property`: a listed property
//! - `VisitSchedule`: a seller-published time window open for visits
//! - `ScheduledVisit`: a buyer's booking against a window
//!
//! Records are plain data. Cross-record references are plain ids resolved by
//! linear scan at read time; the services own any referential checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record identifier, unique per collection
pub type Id = u32;

/// A record that can live in a [`Collection`](crate::store::Collection)
pub trait Entity {
    /// Collection-unique identifier
    fn id(&self) -> Id;
}

/// Marketplace role of a user
///
/// Wire names follow the marketplace vocabulary: sellers are `VENDEDOR`,
/// buyers are `COMPRADOR`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "VENDEDOR")]
    Seller,
    #[serde(rename = "COMPRADOR")]
    Buyer,
}

impl Role {
    /// Dashboard path a user of this role lands on after login or on a
    /// role-mismatched access attempt
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Seller => "/vendedor/dashboard",
            Role::Buyer => "/comprador/dashboard",
        }
    }

    /// Get all roles for iteration
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Seller, Role::Buyer]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Seller => write!(f, "VENDEDOR"),
            Role::Buyer => write!(f, "COMPRADOR"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "VENDEDOR" | "SELLER" => Ok(Role::Seller),
            "COMPRADOR" | "BUYER" => Ok(Role::Buyer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Publication status of a property listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Visible to buyers
    Published,
    /// Temporarily hidden by the seller
    Paused,
    /// A sale is underway
    TransactionInProgress,
    /// Sale closed
    TransactionFinalized,
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicationStatus::Published => write!(f, "published"),
            PublicationStatus::Paused => write!(f, "paused"),
            PublicationStatus::TransactionInProgress => write!(f, "transaction_in_progress"),
            PublicationStatus::TransactionFinalized => write!(f, "transaction_finalized"),
        }
    }
}

/// Lifecycle status of a scheduled visit
///
/// Transitions are enforced by [`VisitStatus::can_transition_to`]:
/// pending may be confirmed or cancelled, confirmed may be completed or
/// cancelled, and completed/cancelled are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl VisitStatus {
    /// Whether a visit in this status may move to `next`
    pub fn can_transition_to(&self, next: VisitStatus) -> bool {
        matches!(
            (self, next),
            (VisitStatus::Pending, VisitStatus::Confirmed)
                | (VisitStatus::Pending, VisitStatus::Cancelled)
                | (VisitStatus::Confirmed, VisitStatus::Completed)
                | (VisitStatus::Confirmed, VisitStatus::Cancelled)
        )
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, VisitStatus::Cancelled | VisitStatus::Completed)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitStatus::Pending => write!(f, "pending"),
            VisitStatus::Confirmed => write!(f, "confirmed"),
            VisitStatus::Cancelled => write!(f, "cancelled"),
            VisitStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A marketplace account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    /// Salted SHA-256 digest, `salt$hash` in URL-safe base64
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for User {
    fn id(&self) -> Id {
        self.id
    }
}

/// A property category (e.g. house, apartment, office)
///
/// Soft-deleted via the `active` flag; inactive categories stay on record
/// and keep blocking duplicate names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl Entity for Category {
    fn id(&self) -> Id {
        self.id
    }
}

/// A city/department pair a property can be located in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: Id,
    pub city: String,
    pub city_description: String,
    pub department: String,
    pub department_description: String,
    pub active: bool,
}

impl Entity for Location {
    fn id(&self) -> Id {
        self.id
    }
}

/// A listed property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
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

impl Entity for Property {
    fn id(&self) -> Id {
        self.id
    }
}

/// A seller-published time window open for visit bookings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitSchedule {
    pub id: Id,
    pub seller_id: Id,
    pub property_id: Id,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Remaining bookable slots; decremented on booking, restored on
    /// cancellation
    pub available_slots: u32,
    /// Ids of visits booked against this window
    pub visit_ids: Vec<Id>,
}

impl VisitSchedule {
    /// Whether this window can still accept a booking at `now`
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.available_slots > 0 && self.end > now
    }
}

impl Entity for VisitSchedule {
    fn id(&self) -> Id {
        self.id
    }
}

/// A buyer's booking against a visit window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledVisit {
    pub id: Id,
    pub schedule_id: Id,
    pub buyer_email: String,
    pub status: VisitStatus,
    pub requested_at: DateTime<Utc>,
}

impl Entity for ScheduledVisit {
    fn id(&self) -> Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_dashboard_paths() {
        assert_eq!(Role::Admin.dashboard_path(), "/admin/dashboard");
        assert_eq!(Role::Seller.dashboard_path(), "/vendedor/dashboard");
        assert_eq!(Role::Buyer.dashboard_path(), "/comprador/dashboard");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"VENDEDOR\"");
        let parsed: Role = serde_json::from_str("\"COMPRADOR\"").unwrap();
        assert_eq!(parsed, Role::Buyer);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("vendedor".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert!("landlord".parse::<Role>().is_err());
    }

    #[test]
    fn test_visit_status_transitions() {
        assert!(VisitStatus::Pending.can_transition_to(VisitStatus::Confirmed));
        assert!(VisitStatus::Pending.can_transition_to(VisitStatus::Cancelled));
        assert!(VisitStatus::Confirmed.can_transition_to(VisitStatus::Completed));
        assert!(VisitStatus::Confirmed.can_transition_to(VisitStatus::Cancelled));

        // completed never returns to pending
        assert!(!VisitStatus::Completed.can_transition_to(VisitStatus::Pending));
        assert!(!VisitStatus::Cancelled.can_transition_to(VisitStatus::Pending));
        assert!(!VisitStatus::Pending.can_transition_to(VisitStatus::Completed));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(VisitStatus::Cancelled.is_terminal());
        assert!(VisitStatus::Completed.is_terminal());
        assert!(!VisitStatus::Pending.is_terminal());
        assert!(!VisitStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_schedule_is_open() {
        let now = Utc::now();
        let schedule = VisitSchedule {
            id: 1,
            seller_id: 1,
            property_id: 1,
            start: now - chrono::Duration::hours(1),
            end: now + chrono::Duration::hours(1),
            available_slots: 2,
            visit_ids: vec![],
        };
        assert!(schedule.is_open(now));

        let full = VisitSchedule {
            available_slots: 0,
            ..schedule.clone()
        };
        assert!(!full.is_open(now));

        let past = VisitSchedule {
            end: now - chrono::Duration::minutes(5),
            ..schedule
        };
        assert!(!past.is_open(now));
    }
}
