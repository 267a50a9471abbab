//! Inmomarket market store
//!
//! The injected state container behind every service: one in-memory
//! collection per record kind, guarded by Tokio's async RwLock. There are no
//! transactions and no cross-collection locking; concurrent writers resolve
//! last-write-wins, and each mutation is atomic only within its collection.
//!
//! Collections can round-trip to per-collection JSON snapshot files under the
//! data directory (`categories.json`, `properties.json`, ...). The snapshot
//! schema is whatever shape was last written; there is no versioning or
//! migration.

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{
    Category, Entity, Id, Location, Property, ScheduledVisit, User, VisitSchedule,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Configuration for the market store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for snapshot files
    pub data_dir: PathBuf,
    /// Whether load/save of snapshots touches disk at all
    pub snapshots_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("inmomarket_data"),
            snapshots_enabled: true,
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Path of the snapshot file for a collection
    pub fn snapshot_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", file))
    }
}

/// Rows plus the id watermark, the unit a snapshot file stores
#[derive(Debug, Serialize, Deserialize)]
struct Table<T> {
    next_id: Id,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

/// One record kind's rows behind an async RwLock
///
/// Reads clone records out; mutations run a caller closure under the write
/// lock so check-and-set sequences (slot decrements, status transitions) are
/// atomic within the collection. Lookups are linear scans.
pub struct Collection<T> {
    /// Singular entity name, used in error messages
    entity: &'static str,
    /// Snapshot file stem, mirroring the original persisted-state key
    file: &'static str,
    table: RwLock<Table<T>>,
}

impl<T> Collection<T>
where
    T: Entity + Clone + Serialize + DeserializeOwned,
{
    fn new(entity: &'static str, file: &'static str) -> Self {
        Self {
            entity,
            file,
            table: RwLock::new(Table::default()),
        }
    }

    /// Insert a record built from the next free id
    pub async fn insert(&self, build: impl FnOnce(Id) -> T) -> T {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let row = build(id);
        table.rows.push(row.clone());
        row
    }

    /// Fetch a record by id
    pub async fn get(&self, id: Id) -> StoreResult<T> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: self.entity,
                id,
            })
    }

    /// First record matching a predicate
    pub async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.table.read().await.rows.iter().find(|r| pred(r)).cloned()
    }

    /// All records matching a predicate
    pub async fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }

    /// All records
    pub async fn all(&self) -> Vec<T> {
        self.table.read().await.rows.clone()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    /// Mutate a record in place under the write lock
    pub async fn update(&self, id: Id, apply: impl FnOnce(&mut T)) -> StoreResult<T> {
        self.try_update(id, |row| {
            apply(row);
            Ok::<(), StoreError>(())
        })
        .await
    }

    /// Mutate a record with a fallible closure; the record is untouched when
    /// the closure rejects
    pub async fn try_update<E>(
        &self,
        id: Id,
        apply: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound {
                entity: self.entity,
                id,
            })?;
        let mut candidate = row.clone();
        apply(&mut candidate)?;
        *row = candidate.clone();
        Ok(candidate)
    }

    /// Remove and return a record
    pub async fn remove(&self, id: Id) -> StoreResult<T> {
        let mut table = self.table.write().await;
        let pos = table
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound {
                entity: self.entity,
                id,
            })?;
        Ok(table.rows.remove(pos))
    }

    /// Load the collection from its snapshot file, if present
    async fn load(&self, config: &StoreConfig) -> StoreResult<()> {
        let path = config.snapshot_path(self.file);
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)?;
        let table: Table<T> = serde_json::from_str(&content)?;
        *self.table.write().await = table;
        Ok(())
    }

    /// Save the collection to its snapshot file
    async fn save(&self, config: &StoreConfig) -> StoreResult<()> {
        let path = config.snapshot_path(self.file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let table = self.table.read().await;
        let content = serde_json::to_string_pretty(&*table)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

/// The market store: every collection the marketplace persists
pub struct MarketStore {
    config: StoreConfig,
    users: Collection<User>,
    categories: Collection<Category>,
    locations: Collection<Location>,
    properties: Collection<Property>,
    schedules: Collection<VisitSchedule>,
    visits: Collection<ScheduledVisit>,
}

impl MarketStore {
    /// Create an empty store with the given configuration
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            users: Collection::new("user", "users"),
            categories: Collection::new("category", "categories"),
            locations: Collection::new("location", "locations"),
            properties: Collection::new("property", "properties"),
            schedules: Collection::new("visit schedule", "schedules"),
            visits: Collection::new("visit", "visits"),
        }
    }

    /// Create a store that never touches disk (tests, demos)
    pub fn in_memory() -> Self {
        Self::new(StoreConfig {
            snapshots_enabled: false,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn categories(&self) -> &Collection<Category> {
        &self.categories
    }

    pub fn locations(&self) -> &Collection<Location> {
        &self.locations
    }

    pub fn properties(&self) -> &Collection<Property> {
        &self.properties
    }

    pub fn schedules(&self) -> &Collection<VisitSchedule> {
        &self.schedules
    }

    pub fn visits(&self) -> &Collection<ScheduledVisit> {
        &self.visits
    }

    /// Load every collection from its snapshot file. Missing files leave the
    /// collection empty.
    pub async fn load_snapshots(&self) -> StoreResult<()> {
        if !self.config.snapshots_enabled {
            return Ok(());
        }
        self.users.load(&self.config).await?;
        self.categories.load(&self.config).await?;
        self.locations.load(&self.config).await?;
        self.properties.load(&self.config).await?;
        self.schedules.load(&self.config).await?;
        self.visits.load(&self.config).await?;
        tracing::info!(data_dir = %self.config.data_dir.display(), "Loaded store snapshots");
        Ok(())
    }

    /// Save every collection to its snapshot file
    pub async fn save_snapshots(&self) -> StoreResult<()> {
        if !self.config.snapshots_enabled {
            return Ok(());
        }
        self.users.save(&self.config).await?;
        self.categories.save(&self.config).await?;
        self.locations.save(&self.config).await?;
        self.properties.save(&self.config).await?;
        self.schedules.save(&self.config).await?;
        self.visits.save(&self.config).await?;
        tracing::debug!(data_dir = %self.config.data_dir.display(), "Saved store snapshots");
        Ok(())
    }

    /// Row counts per collection, for startup logging and health reporting
    pub async fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.users.len().await,
            categories: self.categories.len().await,
            locations: self.locations.len().await,
            properties: self.properties.len().await,
            schedules: self.schedules.len().await,
            visits: self.visits.len().await,
        }
    }
}

/// Row counts per collection
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub categories: usize,
    pub locations: usize,
    pub properties: usize,
    pub schedules: usize,
    pub visits: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users, {} categories, {} locations, {} properties, {} schedules, {} visits",
            self.users, self.categories, self.locations, self.properties, self.schedules,
            self.visits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Id, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: String::new(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MarketStore::in_memory();
        let a = store.categories().insert(|id| category(id, "Casa")).await;
        let b = store.categories().insert(|id| category(id, "Apartamento")).await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_remove() {
        let store = MarketStore::in_memory();
        let a = store.categories().insert(|id| category(id, "Casa")).await;
        store.categories().remove(a.id).await.unwrap();
        let b = store.categories().insert(|id| category(id, "Oficina")).await;
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MarketStore::in_memory();
        let err = store.categories().get(99).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99, .. }));
        assert_eq!(err.to_string(), "category with id 99 not found");
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let store = MarketStore::in_memory();
        let a = store.categories().insert(|id| category(id, "Casa")).await;
        let updated = store
            .categories()
            .update(a.id, |c| c.active = false)
            .await
            .unwrap();
        assert!(!updated.active);
        assert!(!store.categories().get(a.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_try_update_rejection_leaves_record_untouched() {
        let store = MarketStore::in_memory();
        let a = store.categories().insert(|id| category(id, "Casa")).await;
        let result = store
            .categories()
            .try_update(a.id, |c| {
                c.active = false;
                Err(StoreError::Serialization("nope".into()))
            })
            .await;
        assert!(result.is_err());
        assert!(store.categories().get(a.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_remove_then_get_fails() {
        let store = MarketStore::in_memory();
        let a = store.categories().insert(|id| category(id, "Casa")).await;
        store.categories().remove(a.id).await.unwrap();
        assert!(store.categories().get(a.id).await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path());

        let store = MarketStore::new(config.clone());
        store.categories().insert(|id| category(id, "Casa")).await;
        store
            .users()
            .insert(|id| User {
                id,
                email: "ana@example.com".to_string(),
                full_name: "Ana".to_string(),
                phone: "3001234567".to_string(),
                role: crate::store::types::Role::Seller,
                password_hash: "x".to_string(),
                created_at: Utc::now(),
            })
            .await;
        store.save_snapshots().await.unwrap();

        let reloaded = MarketStore::new(config);
        reloaded.load_snapshots().await.unwrap();
        assert_eq!(reloaded.categories().len().await, 1);
        assert_eq!(reloaded.users().len().await, 1);
        assert_eq!(
            reloaded.categories().get(1).await.unwrap().name,
            "Casa"
        );

        // id watermark survives the round trip
        let next = reloaded.categories().insert(|id| category(id, "Lote")).await;
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_snapshots_disabled_skips_disk() {
        let store = MarketStore::in_memory();
        store.categories().insert(|id| category(id, "Casa")).await;
        store.save_snapshots().await.unwrap();
        assert!(!store.config().snapshot_path("categories").exists());
    }
}
