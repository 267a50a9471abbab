//! Catalog services
//!
//! Categories and locations a property is classified under. Both are
//! soft-deleted via an `active` flag and both enforce a case- and
//! whitespace-insensitive uniqueness rule: categories on `name`, locations
//! on `department`. Inactive records disappear from active listings but keep
//! blocking duplicate names.

use crate::store::{Category, Id, Location, MarketStore, StoreError};
use crate::validate::{self, ValidationError};
use std::sync::Arc;
use thiserror::Error;

/// Errors from catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Normalized-name collision
    #[error("a {kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Comparison key for uniqueness checks: trimmed, lowercased
pub fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Service over the category and location collections
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<MarketStore>,
}

impl CatalogService {
    pub fn new(store: Arc<MarketStore>) -> Self {
        Self { store }
    }

    // ---- categories ----

    /// Create a category, rejecting normalized-name duplicates
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> CatalogResult<Category> {
        validate::length("name", name, 3, 50)?;
        validate::length("description", description, 0, 200)?;

        if self.is_category_name_taken(name, None).await {
            return Err(CatalogError::DuplicateName {
                kind: "category",
                name: name.trim().to_string(),
            });
        }

        let category = self
            .store
            .categories()
            .insert(|id| Category {
                id,
                name: name.trim().to_string(),
                description: description.trim().to_string(),
                active: true,
            })
            .await;

        tracing::info!(category_id = category.id, name = %category.name, "Created category");
        Ok(category)
    }

    /// Update name/description, keeping the uniqueness rule (the record
    /// itself is excluded from the collision check)
    pub async fn update_category(
        &self,
        id: Id,
        name: &str,
        description: &str,
    ) -> CatalogResult<Category> {
        validate::length("name", name, 3, 50)?;
        validate::length("description", description, 0, 200)?;

        if self.is_category_name_taken(name, Some(id)).await {
            return Err(CatalogError::DuplicateName {
                kind: "category",
                name: name.trim().to_string(),
            });
        }

        let updated = self
            .store
            .categories()
            .update(id, |c| {
                c.name = name.trim().to_string();
                c.description = description.trim().to_string();
            })
            .await?;
        Ok(updated)
    }

    /// Soft delete: the category stays on record and keeps blocking
    /// duplicate names
    pub async fn deactivate_category(&self, id: Id) -> CatalogResult<Category> {
        let updated = self
            .store
            .categories()
            .update(id, |c| c.active = false)
            .await?;
        tracing::info!(category_id = id, "Deactivated category");
        Ok(updated)
    }

    pub async fn category(&self, id: Id) -> CatalogResult<Category> {
        Ok(self.store.categories().get(id).await?)
    }

    /// Active categories, or everything when `include_inactive` is set
    pub async fn list_categories(&self, include_inactive: bool) -> Vec<Category> {
        self.store
            .categories()
            .filter(|c| include_inactive || c.active)
            .await
    }

    /// Whether a normalized name collides with any category, active or not
    pub async fn is_category_name_taken(&self, name: &str, excluding: Option<Id>) -> bool {
        let key = normalized(name);
        self.store
            .categories()
            .find(|c| normalized(&c.name) == key && Some(c.id) != excluding)
            .await
            .is_some()
    }

    // ---- locations ----

    /// Create a location, rejecting normalized-department duplicates
    pub async fn create_location(
        &self,
        city: &str,
        city_description: &str,
        department: &str,
        department_description: &str,
    ) -> CatalogResult<Location> {
        validate::length("city", city, 2, 50)?;
        validate::length("department", department, 2, 50)?;
        validate::length("city_description", city_description, 0, 200)?;
        validate::length("department_description", department_description, 0, 200)?;

        if self.is_department_taken(department, None).await {
            return Err(CatalogError::DuplicateName {
                kind: "location",
                name: department.trim().to_string(),
            });
        }

        let location = self
            .store
            .locations()
            .insert(|id| Location {
                id,
                city: city.trim().to_string(),
                city_description: city_description.trim().to_string(),
                department: department.trim().to_string(),
                department_description: department_description.trim().to_string(),
                active: true,
            })
            .await;

        tracing::info!(location_id = location.id, department = %location.department, "Created location");
        Ok(location)
    }

    pub async fn update_location(
        &self,
        id: Id,
        city: &str,
        city_description: &str,
        department: &str,
        department_description: &str,
    ) -> CatalogResult<Location> {
        validate::length("city", city, 2, 50)?;
        validate::length("department", department, 2, 50)?;

        if self.is_department_taken(department, Some(id)).await {
            return Err(CatalogError::DuplicateName {
                kind: "location",
                name: department.trim().to_string(),
            });
        }

        let updated = self
            .store
            .locations()
            .update(id, |l| {
                l.city = city.trim().to_string();
                l.city_description = city_description.trim().to_string();
                l.department = department.trim().to_string();
                l.department_description = department_description.trim().to_string();
            })
            .await?;
        Ok(updated)
    }

    pub async fn deactivate_location(&self, id: Id) -> CatalogResult<Location> {
        let updated = self
            .store
            .locations()
            .update(id, |l| l.active = false)
            .await?;
        tracing::info!(location_id = id, "Deactivated location");
        Ok(updated)
    }

    pub async fn location(&self, id: Id) -> CatalogResult<Location> {
        Ok(self.store.locations().get(id).await?)
    }

    pub async fn list_locations(&self, include_inactive: bool) -> Vec<Location> {
        self.store
            .locations()
            .filter(|l| include_inactive || l.active)
            .await
    }

    /// Whether a normalized department collides with any location
    pub async fn is_department_taken(&self, department: &str, excluding: Option<Id>) -> bool {
        let key = normalized(department);
        self.store
            .locations()
            .find(|l| normalized(&l.department) == key && Some(l.id) != excluding)
            .await
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MarketStore::in_memory()))
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_and_whitespace_insensitive() {
        let catalog = service();
        catalog.create_category("Casa ", "homes").await.unwrap();

        let err = catalog.create_category(" casa", "more homes").await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { kind: "category", .. }));
    }

    #[tokio::test]
    async fn test_created_names_are_stored_trimmed() {
        let catalog = service();
        let cat = catalog.create_category("  Apartamento  ", "flats").await.unwrap();
        assert_eq!(cat.name, "Apartamento");
    }

    #[tokio::test]
    async fn test_inactive_excluded_from_active_listing() {
        let catalog = service();
        let casa = catalog.create_category("Casa", "homes").await.unwrap();
        catalog.create_category("Oficina", "offices").await.unwrap();
        catalog.deactivate_category(casa.id).await.unwrap();

        let active = catalog.list_categories(false).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Oficina");

        let all = catalog.list_categories(true).await;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_inactive_still_blocks_duplicates() {
        let catalog = service();
        let casa = catalog.create_category("Casa", "homes").await.unwrap();
        catalog.deactivate_category(casa.id).await.unwrap();

        assert!(catalog.create_category("CASA", "again").await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_own_name() {
        let catalog = service();
        let casa = catalog.create_category("Casa", "homes").await.unwrap();

        // renaming to itself (case shifted) is not a collision
        let updated = catalog.update_category(casa.id, "CASA", "homes").await.unwrap();
        assert_eq!(updated.name, "CASA");

        // but colliding with another record is
        catalog.create_category("Oficina", "offices").await.unwrap();
        assert!(catalog.update_category(casa.id, "oficina ", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_short_name_rejected() {
        let catalog = service();
        let err = catalog.create_category("Ca", "too short").await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_department_uniqueness() {
        let catalog = service();
        catalog
            .create_location("Medellín", "", "Antioquia ", "")
            .await
            .unwrap();

        let err = catalog
            .create_location("Envigado", "", " antioquia", "")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { kind: "location", .. }));
    }

    #[tokio::test]
    async fn test_deactivated_location_excluded() {
        let catalog = service();
        let loc = catalog
            .create_location("Bogotá", "", "Cundinamarca", "")
            .await
            .unwrap();
        catalog.deactivate_location(loc.id).await.unwrap();
        assert!(catalog.list_locations(false).await.is_empty());
        assert_eq!(catalog.list_locations(true).await.len(), 1);
    }
}
