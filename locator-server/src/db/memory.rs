//! In-process store repository
//!
//! Same contract as the PostgreSQL repository: upserts are keyed by name and
//! applied atomically under one write lock, reads come back ordered by name.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Store, StoreRecord};
use tokio::sync::RwLock;

use super::{BoundingBox, BoxError, StoreRepository};

#[derive(Default)]
pub struct MemoryStoreRepository {
    stores: RwLock<BTreeMap<String, Store>>,
    writes: AtomicUsize,
}

impl MemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `upsert_many` calls that reached storage
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Insert a fully stamped row, bypassing the write counter
    pub async fn seed(&self, store: Store) {
        self.stores
            .write()
            .await
            .insert(store.record.name.clone(), store);
    }

    pub async fn len(&self) -> usize {
        self.stores.read().await.len()
    }

    pub async fn get(&self, name: &str) -> Option<Store> {
        self.stores.read().await.get(name).cloned()
    }
}

#[async_trait]
impl StoreRepository for MemoryStoreRepository {
    async fn upsert_many(
        &self,
        records: &[StoreRecord],
        updated_at: DateTime<Utc>,
    ) -> Result<u64, BoxError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut stores = self.stores.write().await;
        for record in records {
            stores.insert(record.name.clone(), record.clone().into_store(updated_at));
        }
        Ok(records.len() as u64)
    }

    async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Store>, BoxError> {
        let stores = self.stores.read().await;
        Ok(stores.values().filter(|s| bbox.contains(s)).cloned().collect())
    }

    async fn updated_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Store>, BoxError> {
        let stores = self.stores.read().await;
        Ok(stores
            .values()
            .filter(|s| s.updated_at >= cutoff)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Store>, BoxError> {
        Ok(self.stores.read().await.values().cloned().collect())
    }
}
