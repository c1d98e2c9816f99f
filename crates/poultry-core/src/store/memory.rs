// # Memory Record Store
//
// In-memory implementation of RecordStore.
//
// ## Purpose
//
// Provides a fast store that doesn't persist across restarts. Useful for
// tests, demos and throwaway deployments.
//
// ## Ordering
//
// Records are kept in insertion order; removal preserves the order of the rest.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::config::StoreConfig;
use crate::model::{ProductionFields, ProductionRecord, RecordId, RecordPatch};
use crate::traits::record_store::{RecordStore, RecordStoreFactory};

/// In-memory record store
///
/// # Example
///
/// ```rust,no_run
/// use poultry_core::store::MemoryRecordStore;
/// use poultry_core::traits::RecordStore;
/// use poultry_core::model::ProductionFields;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryRecordStore::new();
///     let record = store.insert(ProductionFields::default()).await?;
///     assert_eq!(store.list().await?.len(), 1);
///     assert_eq!(store.list().await?, vec![record]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<RwLock<IndexMap<RecordId, ProductionFields>>>,
}

impl MemoryRecordStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of records in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<ProductionRecord>, Error> {
        let guard = self.inner.read().await;
        Ok(guard
            .iter()
            .map(|(id, fields)| ProductionRecord::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn insert(&self, fields: ProductionFields) -> Result<ProductionRecord, Error> {
        let mut guard = self.inner.write().await;
        let mut id = RecordId::generate();
        while guard.contains_key(&id) {
            id = RecordId::generate();
        }
        guard.insert(id.clone(), fields.clone());
        Ok(ProductionRecord::new(id, fields))
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<Option<ProductionRecord>, Error> {
        let mut guard = self.inner.write().await;
        Ok(guard.get_mut(id).map(|fields| {
            fields.apply(patch);
            ProductionRecord::new(id.clone(), fields.clone())
        }))
    }

    async fn remove(&self, id: &RecordId) -> Result<Option<ProductionRecord>, Error> {
        let mut guard = self.inner.write().await;
        Ok(guard
            .shift_remove(id)
            .map(|fields| ProductionRecord::new(id.clone(), fields)))
    }

    async fn flush(&self) -> Result<(), Error> {
        // Nothing buffered
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

/// Factory for memory stores
pub struct MemoryRecordStoreFactory;

#[async_trait]
impl RecordStoreFactory for MemoryRecordStoreFactory {
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>, Error> {
        match config {
            StoreConfig::Memory => Ok(Box::new(MemoryRecordStore::new())),
            _ => Err(Error::config("Invalid config for memory store")),
        }
    }
}
