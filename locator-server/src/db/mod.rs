//! Database access layer
//!
//! [`StoreRepository`] is the only seam between the HTTP handlers and
//! storage. `PgStoreRepository` backs the running server, the in-memory
//! implementation backs the test suite.

pub mod memory;
pub mod store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Store, StoreRecord};

pub use memory::MemoryStoreRepository;
pub use store::PgStoreRepository;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Inclusive latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl BoundingBox {
    /// `false` when any bound is NaN; such a box matches nothing
    pub fn is_searchable(&self) -> bool {
        ![self.min_lat, self.max_lat, self.min_long, self.max_long]
            .iter()
            .any(|v| v.is_nan())
    }

    pub fn contains(&self, store: &Store) -> bool {
        store.within(self.min_lat, self.max_lat, self.min_long, self.max_long)
    }
}

/// Insert-or-update-many plus the three read paths over the `store` table
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Upsert every record keyed by `name`, stamping each with `updated_at`.
    ///
    /// All-or-nothing: on error no record is written. Returns the number of
    /// rows inserted or updated.
    async fn upsert_many(
        &self,
        records: &[StoreRecord],
        updated_at: DateTime<Utc>,
    ) -> Result<u64, BoxError>;

    /// Stores with latitude and longitude inside the box (inclusive)
    async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Store>, BoxError>;

    /// Stores with `updated_at >= cutoff`
    async fn updated_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Store>, BoxError>;

    /// Every store
    async fn list_all(&self) -> Result<Vec<Store>, BoxError>;

    /// Release pooled resources on shutdown
    async fn close(&self) {}
}
