//! Property listings
//!
//! Sellers publish and manage properties classified under an active category
//! and location. Search is a linear filter over the collection with optional
//! sorting, the same shape the store promises everywhere else.

use crate::store::{Id, MarketStore, Property, PublicationStatus, StoreError};
use crate::validate::{self, ValidationError};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

/// Errors from listing operations
#[derive(Error, Debug)]
pub enum ListingError {
    /// Category or location reference is missing or soft-deleted
    #[error("{0} reference is missing or inactive")]
    InactiveReference(&'static str),

    /// The property belongs to a different seller
    #[error("property does not belong to this seller")]
    NotOwner,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

/// Fields a seller supplies when creating or updating a property
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub name: String,
    pub description: String,
    pub rooms: u8,
    pub baths: u8,
    pub price: u64,
    pub category_id: Id,
    pub location_id: Id,
}

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySort {
    PriceAsc,
    PriceDesc,
    /// Most recently listed first (the default)
    Newest,
}

/// Declarative search filter; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub category_id: Option<Id>,
    pub location_id: Option<Id>,
    pub seller_id: Option<Id>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_rooms: Option<u8>,
    pub status: Option<PublicationStatus>,
    pub sort: Option<PropertySort>,
}

/// Service over the property collection
#[derive(Clone)]
pub struct ListingService {
    store: Arc<MarketStore>,
}

impl ListingService {
    pub fn new(store: Arc<MarketStore>) -> Self {
        Self { store }
    }

    /// Create a property for a seller. The category and location must exist
    /// and be active.
    pub async fn create_property(
        &self,
        seller_id: Id,
        draft: PropertyDraft,
    ) -> ListingResult<Property> {
        self.validate_draft(&draft).await?;

        let property = self
            .store
            .properties()
            .insert(|id| Property {
                id,
                name: draft.name.trim().to_string(),
                description: draft.description.trim().to_string(),
                rooms: draft.rooms,
                baths: draft.baths,
                price: draft.price,
                category_id: draft.category_id,
                location_id: draft.location_id,
                seller_id,
                status: PublicationStatus::Published,
                active_since: Utc::now(),
            })
            .await;

        tracing::info!(
            property_id = property.id,
            seller_id,
            name = %property.name,
            "Listed property"
        );
        Ok(property)
    }

    /// Update a property the seller owns
    pub async fn update_property(
        &self,
        seller_id: Id,
        id: Id,
        draft: PropertyDraft,
    ) -> ListingResult<Property> {
        self.validate_draft(&draft).await?;
        self.owned(seller_id, id).await?;

        let updated = self
            .store
            .properties()
            .update(id, |p| {
                p.name = draft.name.trim().to_string();
                p.description = draft.description.trim().to_string();
                p.rooms = draft.rooms;
                p.baths = draft.baths;
                p.price = draft.price;
                p.category_id = draft.category_id;
                p.location_id = draft.location_id;
            })
            .await?;
        Ok(updated)
    }

    /// Change the publication status. All four states are reachable from any
    /// other; publication is not a state machine.
    pub async fn set_status(
        &self,
        seller_id: Id,
        id: Id,
        status: PublicationStatus,
    ) -> ListingResult<Property> {
        self.owned(seller_id, id).await?;
        let updated = self
            .store
            .properties()
            .update(id, |p| p.status = status)
            .await?;
        tracing::info!(property_id = id, status = %status, "Changed publication status");
        Ok(updated)
    }

    /// Remove a property; subsequent listing queries will not return it
    pub async fn delete_property(&self, seller_id: Id, id: Id) -> ListingResult<Property> {
        self.owned(seller_id, id).await?;
        let removed = self.store.properties().remove(id).await?;
        tracing::info!(property_id = id, seller_id, "Deleted property");
        Ok(removed)
    }

    pub async fn property(&self, id: Id) -> ListingResult<Property> {
        Ok(self.store.properties().get(id).await?)
    }

    /// Linear filter over the collection, then an optional sort
    pub async fn search(&self, filter: &PropertyFilter) -> Vec<Property> {
        let mut results = self
            .store
            .properties()
            .filter(|p| {
                filter.category_id.map_or(true, |c| p.category_id == c)
                    && filter.location_id.map_or(true, |l| p.location_id == l)
                    && filter.seller_id.map_or(true, |s| p.seller_id == s)
                    && filter.min_price.map_or(true, |m| p.price >= m)
                    && filter.max_price.map_or(true, |m| p.price <= m)
                    && filter.min_rooms.map_or(true, |m| p.rooms >= m)
                    && filter.status.map_or(true, |st| p.status == st)
            })
            .await;

        match filter.sort.unwrap_or(PropertySort::Newest) {
            PropertySort::PriceAsc => results.sort_by_key(|p| p.price),
            PropertySort::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
            PropertySort::Newest => results.sort_by(|a, b| b.active_since.cmp(&a.active_since)),
        }
        results
    }

    async fn validate_draft(&self, draft: &PropertyDraft) -> ListingResult<()> {
        validate::length("name", &draft.name, 3, 100)?;
        validate::length("description", &draft.description, 0, 500)?;
        validate::positive("price", draft.price)?;
        validate::positive("rooms", draft.rooms as u64)?;

        let category_ok = self
            .store
            .categories()
            .find(|c| c.id == draft.category_id && c.active)
            .await
            .is_some();
        if !category_ok {
            return Err(ListingError::InactiveReference("category"));
        }

        let location_ok = self
            .store
            .locations()
            .find(|l| l.id == draft.location_id && l.active)
            .await
            .is_some();
        if !location_ok {
            return Err(ListingError::InactiveReference("location"));
        }
        Ok(())
    }

    async fn owned(&self, seller_id: Id, id: Id) -> ListingResult<()> {
        let property = self.store.properties().get(id).await?;
        if property.seller_id != seller_id {
            return Err(ListingError::NotOwner);
        }
        Ok(())
    }
}
