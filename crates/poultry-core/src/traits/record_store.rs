// # Record Store Trait
//
// Defines the interface for the document store.
//
// ## Purpose
//
// The store is the single source of truth for production records. It exposes
// a generic list/insert/update/remove surface keyed by `RecordId`; it knows
// nothing about HTTP or about the client.
//
// ## Implementations
//
// - Memory: insertion-ordered map, lost on restart
// - File: JSON document with atomic writes and backup recovery
//
// ## Usage
//
// ```rust,ignore
// use poultry_core::{MemoryRecordStore, RecordPatch, RecordStore};
//
// let store = MemoryRecordStore::new();
// let record = store.insert(ProductionFields::default()).await?;
// let all = store.list().await?;
// ```

use async_trait::async_trait;

use crate::model::{ProductionFields, ProductionRecord, RecordId, RecordPatch};

/// Trait for record store implementations
///
/// Implementations must be thread-safe and usable across async tasks. Each
/// mutating call acts on exactly one record; there are no multi-record
/// transactions. Concurrent updates to the same id are last-write-wins.
///
/// Every error returned from a store is a store fault and surfaces to HTTP
/// callers as 500.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in the store's natural order
    async fn list(&self) -> Result<Vec<ProductionRecord>, crate::Error>;

    /// Persist a new record under a freshly assigned id
    async fn insert(&self, fields: ProductionFields) -> Result<ProductionRecord, crate::Error>;

    /// Apply the keys present in `patch` to an existing record
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: The record after the update
    /// - `Ok(None)`: No record with that id (nothing written)
    /// - `Err(Error)`: Storage error
    async fn update(
        &self,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<Option<ProductionRecord>, crate::Error>;

    /// Remove a record
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: The removed record
    /// - `Ok(None)`: No record with that id
    /// - `Err(Error)`: Storage error
    async fn remove(&self, id: &RecordId) -> Result<Option<ProductionRecord>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;

    /// Short name used in logs
    fn store_name(&self) -> &'static str;
}

/// Helper trait for constructing record stores from configuration
#[async_trait]
pub trait RecordStoreFactory: Send + Sync {
    /// Create a RecordStore instance from configuration
    async fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn RecordStore>, crate::Error>;
}
