//! Visit scheduling and booking
//!
//! Sellers publish time windows against properties they own; buyers book
//! slots inside a window. The slot counter is the enforced capacity rule: a
//! booking atomically decrements it under the schedule collection's write
//! lock and fails once it reaches zero. Cancelling a live visit returns its
//! slot.
//!
//! Availability has one authoritative definition, [`VisitSchedule::is_open`]:
//! the window ends in the future and has remaining slots. Every read path
//! goes through [`VisitService::available_schedules`] so callers never
//! re-filter.
//!
//! Overlapping windows for the same seller are allowed; only window sanity
//! (start before end, end in the future) is checked at creation.

use crate::store::{
    Id, MarketStore, ScheduledVisit, StoreError, VisitSchedule, VisitStatus,
};
use crate::validate::{self, ValidationError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Slots a window opens with when the seller does not say otherwise
pub const DEFAULT_VISIT_SLOTS: u32 = 2;

/// Errors from visit operations
#[derive(Error, Debug)]
pub enum VisitError {
    /// The window has no remaining slots
    #[error("visit window has no remaining slots")]
    CapacityExhausted,

    /// The window already ended
    #[error("visit window is closed")]
    WindowClosed,

    /// The requested status change is not a legal transition
    #[error("cannot move visit from {from} to {to}")]
    InvalidTransition { from: VisitStatus, to: VisitStatus },

    /// The property belongs to a different seller
    #[error("property does not belong to this seller")]
    NotOwner,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for visit operations
pub type VisitResult<T> = Result<T, VisitError>;

/// Declarative filter for open windows; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    /// Windows starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Windows starting before this instant
    pub to: Option<DateTime<Utc>>,
    /// Narrow to windows whose property sits in this location
    pub location_id: Option<Id>,
    pub seller_id: Option<Id>,
}

/// Service over the schedule and visit collections
#[derive(Clone)]
pub struct VisitService {
    store: Arc<MarketStore>,
}

impl VisitService {
    pub fn new(store: Arc<MarketStore>) -> Self {
        Self { store }
    }

    /// Publish a visit window against a property the seller owns
    ///
    /// `slots` falls back to [`DEFAULT_VISIT_SLOTS`]. Overlap with the
    /// seller's other windows is not checked.
    pub async fn create_schedule(
        &self,
        seller_id: Id,
        property_id: Id,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        slots: Option<u32>,
    ) -> VisitResult<VisitSchedule> {
        let property = self.store.properties().get(property_id).await?;
        if property.seller_id != seller_id {
            return Err(VisitError::NotOwner);
        }

        if start >= end {
            return Err(ValidationError::new("start", "must be before end").into());
        }
        if end <= Utc::now() {
            return Err(ValidationError::new("end", "must be in the future").into());
        }

        let slots = slots.unwrap_or(DEFAULT_VISIT_SLOTS);
        validate::positive("slots", slots as u64)?;

        let schedule = self
            .store
            .schedules()
            .insert(|id| VisitSchedule {
                id,
                seller_id,
                property_id,
                start,
                end,
                available_slots: slots,
                visit_ids: Vec::new(),
            })
            .await;

        tracing::info!(
            schedule_id = schedule.id,
            property_id,
            slots,
            "Published visit window"
        );
        Ok(schedule)
    }

    /// Book a slot in a window for a buyer
    ///
    /// The slot decrement happens under the schedule collection's write
    /// lock, so a full window rejects the booking no matter how requests
    /// interleave.
    pub async fn book_visit(
        &self,
        schedule_id: Id,
        buyer_email: &str,
    ) -> VisitResult<ScheduledVisit> {
        validate::email("buyer_email", buyer_email)?;
        let now = Utc::now();

        self.store
            .schedules()
            .try_update(schedule_id, |schedule| {
                if schedule.end <= now {
                    return Err(VisitError::WindowClosed);
                }
                if schedule.available_slots == 0 {
                    return Err(VisitError::CapacityExhausted);
                }
                schedule.available_slots -= 1;
                Ok(())
            })
            .await?;

        let visit = self
            .store
            .visits()
            .insert(|id| ScheduledVisit {
                id,
                schedule_id,
                buyer_email: buyer_email.trim().to_string(),
                status: VisitStatus::Pending,
                requested_at: now,
            })
            .await;

        // Record the booking on the window. The slot was already taken above.
        self.store
            .schedules()
            .update(schedule_id, |s| s.visit_ids.push(visit.id))
            .await?;

        tracing::info!(visit_id = visit.id, schedule_id, "Booked visit");
        Ok(visit)
    }

    /// Open windows matching the filter, soonest first
    ///
    /// "Open" means ending in the future with remaining slots; this is the
    /// only place that rule is applied.
    pub async fn available_schedules(&self, filter: &ScheduleFilter) -> Vec<VisitSchedule> {
        let now = Utc::now();
        let windows = self
            .store
            .schedules()
            .filter(|s| {
                s.is_open(now)
                    && filter.from.map_or(true, |f| s.start >= f)
                    && filter.to.map_or(true, |t| s.start < t)
                    && filter.seller_id.map_or(true, |id| s.seller_id == id)
            })
            .await;

        // The location lives on the property; resolve each reference by scan.
        let mut results = Vec::with_capacity(windows.len());
        for window in windows {
            if let Some(location_id) = filter.location_id {
                match self.store.properties().get(window.property_id).await {
                    Ok(p) if p.location_id == location_id => {}
                    _ => continue,
                }
            }
            results.push(window);
        }

        results.sort_by(|a, b| a.start.cmp(&b.start));
        results
    }

    pub async fn schedule(&self, id: Id) -> VisitResult<VisitSchedule> {
        Ok(self.store.schedules().get(id).await?)
    }

    /// Windows a seller published, regardless of availability
    pub async fn schedules_for_seller(&self, seller_id: Id) -> Vec<VisitSchedule> {
        let mut windows = self
            .store
            .schedules()
            .filter(|s| s.seller_id == seller_id)
            .await;
        windows.sort_by(|a, b| a.start.cmp(&b.start));
        windows
    }

    pub async fn visit(&self, id: Id) -> VisitResult<ScheduledVisit> {
        Ok(self.store.visits().get(id).await?)
    }

    /// Bookings against a window, including cancelled ones
    pub async fn visits_for_schedule(&self, schedule_id: Id) -> Vec<ScheduledVisit> {
        self.store
            .visits()
            .filter(|v| v.schedule_id == schedule_id)
            .await
    }

    /// Bookings a buyer made, newest first
    pub async fn visits_for_buyer(&self, buyer_email: &str) -> Vec<ScheduledVisit> {
        let key = buyer_email.trim().to_lowercase();
        let mut visits = self
            .store
            .visits()
            .filter(|v| v.buyer_email.to_lowercase() == key)
            .await;
        visits.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        visits
    }

    /// Move a visit along its lifecycle; illegal transitions are rejected
    /// and a cancellation returns the slot to the window
    pub async fn update_visit_status(
        &self,
        visit_id: Id,
        next: VisitStatus,
    ) -> VisitResult<ScheduledVisit> {
        let updated = self
            .store
            .visits()
            .try_update(visit_id, |visit| {
                if !visit.status.can_transition_to(next) {
                    return Err(VisitError::InvalidTransition {
                        from: visit.status,
                        to: next,
                    });
                }
                visit.status = next;
                Ok(())
            })
            .await?;

        if next == VisitStatus::Cancelled {
            self.store
                .schedules()
                .update(updated.schedule_id, |s| s.available_slots += 1)
                .await?;
        }

        tracing::info!(visit_id, status = %next, "Visit status changed");
        Ok(updated)
    }

    /// Cancel a pending or confirmed visit
    pub async fn cancel_visit(&self, visit_id: Id) -> VisitResult<ScheduledVisit> {
        self.update_visit_status(visit_id, VisitStatus::Cancelled)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Category, Location, Property, PublicationStatus};
    use chrono::Duration;

    const SELLER: Id = 1;

    async fn seeded() -> (VisitService, Arc<MarketStore>, Id) {
        let store = Arc::new(MarketStore::in_memory());
        let category = store
            .categories()
            .insert(|id| Category {
                id,
                name: "Casa".to_string(),
                description: String::new(),
                active: true,
            })
            .await;
        let location = store
            .locations()
            .insert(|id| Location {
                id,
                city: "Medellín".to_string(),
                city_description: String::new(),
                department: "Antioquia".to_string(),
                department_description: String::new(),
                active: true,
            })
            .await;
        let property = store
            .properties()
            .insert(|id| Property {
                id,
                name: "Casa en El Poblado".to_string(),
                description: String::new(),
                rooms: 3,
                baths: 2,
                price: 100,
                category_id: category.id,
                location_id: location.id,
                seller_id: SELLER,
                status: PublicationStatus::Published,
                active_since: Utc::now(),
            })
            .await;
        (VisitService::new(Arc::clone(&store)), store, property.id)
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc::now() + Duration::days(1);
        (start, start + Duration::hours(2))
    }

    #[tokio::test]
    async fn test_default_slot_count() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();
        assert_eq!(schedule.available_slots, DEFAULT_VISIT_SLOTS);
    }

    #[tokio::test]
    async fn test_create_schedule_rejects_inverted_window() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        assert!(matches!(
            visits.create_schedule(SELLER, property, end, start, None).await,
            Err(VisitError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_schedule_rejects_past_window() {
        let (visits, _store, property) = seeded().await;
        let end = Utc::now() - Duration::hours(1);
        let start = end - Duration::hours(2);
        assert!(matches!(
            visits.create_schedule(SELLER, property, start, end, None).await,
            Err(VisitError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_schedule_rejects_foreign_property() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        assert!(matches!(
            visits.create_schedule(SELLER + 1, property, start, end, None).await,
            Err(VisitError::NotOwner)
        ));
    }

    #[tokio::test]
    async fn test_overlapping_windows_allowed() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();
        // same window again is fine; overlap is not detected
        assert!(visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_booking_decrements_slots() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, Some(3))
            .await
            .unwrap();

        visits.book_visit(schedule.id, "ana@example.com").await.unwrap();
        let after = visits.schedule(schedule.id).await.unwrap();
        assert_eq!(after.available_slots, 2);
        assert_eq!(after.visit_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_full_window_rejects_booking() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();

        visits.book_visit(schedule.id, "ana@example.com").await.unwrap();
        visits.book_visit(schedule.id, "luis@example.com").await.unwrap();

        let err = visits
            .book_visit(schedule.id, "maria@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, VisitError::CapacityExhausted));
    }

    #[tokio::test]
    async fn test_cancellation_returns_slot() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, Some(1))
            .await
            .unwrap();

        let visit = visits.book_visit(schedule.id, "ana@example.com").await.unwrap();
        assert!(matches!(
            visits.book_visit(schedule.id, "luis@example.com").await,
            Err(VisitError::CapacityExhausted)
        ));

        visits.cancel_visit(visit.id).await.unwrap();
        assert!(visits.book_visit(schedule.id, "luis@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_status_machine() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();
        let visit = visits.book_visit(schedule.id, "ana@example.com").await.unwrap();

        // pending -> completed skips confirmation
        assert!(matches!(
            visits.update_visit_status(visit.id, VisitStatus::Completed).await,
            Err(VisitError::InvalidTransition { .. })
        ));

        visits
            .update_visit_status(visit.id, VisitStatus::Confirmed)
            .await
            .unwrap();
        let done = visits
            .update_visit_status(visit.id, VisitStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, VisitStatus::Completed);

        // completed never returns to pending
        assert!(matches!(
            visits.update_visit_status(visit.id, VisitStatus::Pending).await,
            Err(VisitError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_is_terminal() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();
        let visit = visits.book_visit(schedule.id, "ana@example.com").await.unwrap();

        visits.cancel_visit(visit.id).await.unwrap();
        // a second cancellation must not return another slot
        assert!(visits.cancel_visit(visit.id).await.is_err());
        let after = visits.schedule(schedule.id).await.unwrap();
        assert_eq!(after.available_slots, DEFAULT_VISIT_SLOTS);
    }

    #[tokio::test]
    async fn test_availability_excludes_full_windows() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, Some(1))
            .await
            .unwrap();

        assert_eq!(visits.available_schedules(&ScheduleFilter::default()).await.len(), 1);

        visits.book_visit(schedule.id, "ana@example.com").await.unwrap();
        assert!(visits
            .available_schedules(&ScheduleFilter::default())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_availability_filters_by_date_range() {
        let (visits, _store, property) = seeded().await;
        let soon = Utc::now() + Duration::days(1);
        let later = Utc::now() + Duration::days(10);
        visits
            .create_schedule(SELLER, property, soon, soon + Duration::hours(1), None)
            .await
            .unwrap();
        visits
            .create_schedule(SELLER, property, later, later + Duration::hours(1), None)
            .await
            .unwrap();

        let this_week = visits
            .available_schedules(&ScheduleFilter {
                to: Some(Utc::now() + Duration::days(7)),
                ..Default::default()
            })
            .await;
        assert_eq!(this_week.len(), 1);
        assert_eq!(this_week[0].start, soon);
    }

    #[tokio::test]
    async fn test_availability_filters_by_location() {
        let (visits, store, property) = seeded().await;
        let (start, end) = window();
        visits
            .create_schedule(SELLER, property, start, end, None)
            .await
            .unwrap();

        let location_id = store.properties().get(property).await.unwrap().location_id;
        let here = visits
            .available_schedules(&ScheduleFilter {
                location_id: Some(location_id),
                ..Default::default()
            })
            .await;
        assert_eq!(here.len(), 1);

        let elsewhere = visits
            .available_schedules(&ScheduleFilter {
                location_id: Some(location_id + 1),
                ..Default::default()
            })
            .await;
        assert!(elsewhere.is_empty());
    }

    #[tokio::test]
    async fn test_visits_for_buyer() {
        let (visits, _store, property) = seeded().await;
        let (start, end) = window();
        let schedule = visits
            .create_schedule(SELLER, property, start, end, Some(5))
            .await
            .unwrap();

        visits.book_visit(schedule.id, "ana@example.com").await.unwrap();
        visits.book_visit(schedule.id, "Ana@Example.com").await.unwrap();
        visits.book_visit(schedule.id, "luis@example.com").await.unwrap();

        assert_eq!(visits.visits_for_buyer("ana@example.com").await.len(), 2);
        assert_eq!(visits.visits_for_buyer("luis@example.com").await.len(), 1);
    }
}
