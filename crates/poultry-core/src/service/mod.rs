//! Record service
//!
//! The RecordService is responsible for:
//! - Listing the collection
//! - Creating records from coerced payloads
//! - Updating records by id (404 semantics when missing)
//! - Deleting records by id (identifier validated before store access)
//!
//! ## Error Taxonomy
//!
//! | Error | Raised when |
//! |---|---|
//! | `StoreUnavailable` | any store fault |
//! | `NotFound` | update/delete target missing |
//! | `InvalidIdentifier` | delete target not a well-formed id |
//! | `InvalidPayload` | a field cannot be coerced |
//!
//! The service holds no per-request state; each call performs at most one
//! store mutation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{ProductionFields, ProductionRecord, RecordId, RecordPatch};
use crate::traits::{DeleteConfirmation, RecordApi, RecordStore};

/// Message for a missing update/delete target
pub const NOT_FOUND_MESSAGE: &str = "Poultry data not found";

/// Service-side record operations over a shared store
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("store", &self.store.store_name())
            .finish()
    }
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Build a service from a boxed store (as returned by the registry)
    pub fn from_boxed(store: Box<dyn RecordStore>) -> Self {
        Self::new(Arc::from(store))
    }

    /// Name of the backing store
    pub fn store_name(&self) -> &'static str {
        self.store.store_name()
    }

    /// List every record in store order
    pub async fn list_records(&self) -> Result<Vec<ProductionRecord>> {
        debug!("Listing records");
        self.store.list().await.map_err(|e| {
            warn!("List failed: {}", e);
            into_store_fault(e)
        })
    }

    /// Create a record; the store assigns the id
    pub async fn create_record(&self, payload: &RecordPatch) -> Result<ProductionRecord> {
        let fields = ProductionFields::from_patch(payload);
        let record = self.store.insert(fields).await.map_err(|e| {
            warn!("Create failed: {}", e);
            into_store_fault(e)
        })?;

        info!("Created record {}", record.id);
        Ok(record)
    }

    /// Apply a payload to the record with id `raw_id`
    ///
    /// A malformed id cannot name a stored record, so it yields `NotFound`.
    pub async fn update_record(&self, raw_id: &str, payload: &RecordPatch) -> Result<ProductionRecord> {
        let Ok(id) = RecordId::parse(raw_id) else {
            debug!("Update target '{}' is not a record id", raw_id);
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        };

        match self.store.update(&id, payload).await {
            Ok(Some(record)) => {
                info!("Updated record {}", id);
                Ok(record)
            }
            Ok(None) => {
                debug!("Update target {} not found", id);
                Err(Error::not_found(NOT_FOUND_MESSAGE))
            }
            Err(e) => {
                warn!("Update of {} failed: {}", id, e);
                Err(into_store_fault(e))
            }
        }
    }

    /// Delete the record with id `raw_id`
    ///
    /// The id is validated before the store is touched.
    pub async fn delete_record(&self, raw_id: &str) -> Result<DeleteConfirmation> {
        let id = RecordId::parse(raw_id)?;

        match self.store.remove(&id).await {
            Ok(Some(_)) => {
                info!("Deleted record {}", id);
                Ok(DeleteConfirmation::deleted())
            }
            Ok(None) => {
                debug!("Delete target {} not found", id);
                Err(Error::not_found(NOT_FOUND_MESSAGE))
            }
            Err(e) => {
                warn!("Delete of {} failed: {}", id, e);
                Err(into_store_fault(e))
            }
        }
    }

    /// Flush the backing store
    pub async fn flush(&self) -> Result<()> {
        self.store.flush().await.map_err(into_store_fault)
    }
}

/// Collapse any store-side error into `StoreUnavailable`, keeping its message
fn into_store_fault(err: Error) -> Error {
    match err {
        Error::StoreUnavailable(_) => err,
        other => Error::store(other.to_string()),
    }
}

#[async_trait]
impl RecordApi for RecordService {
    async fn list(&self) -> Result<Vec<ProductionRecord>> {
        self.list_records().await
    }

    async fn create(&self, payload: &RecordPatch) -> Result<ProductionRecord> {
        self.create_record(payload).await
    }

    async fn update(&self, id: &RecordId, payload: &RecordPatch) -> Result<ProductionRecord> {
        self.update_record(id.as_str(), payload).await
    }

    async fn delete(&self, id: &RecordId) -> Result<DeleteConfirmation> {
        self.delete_record(id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;

    fn service() -> RecordService {
        RecordService::new(Arc::new(MemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn update_with_malformed_id_is_not_found() {
        let svc = service();
        let result = svc.update_record("xyz", &RecordPatch::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_with_malformed_id_is_invalid_identifier() {
        let svc = service();
        let result = svc.delete_record("xyz").await;
        assert!(matches!(result, Err(Error::InvalidIdentifier(_))));
    }

    #[test]
    fn typed_store_errors_collapse_to_store_unavailable() {
        let io = Error::Io(std::io::Error::other("disk full"));
        let err = into_store_fault(io);
        assert!(matches!(&err, Error::StoreUnavailable(msg) if msg.contains("disk full")));

        let already = into_store_fault(Error::store("down"));
        assert!(matches!(already, Error::StoreUnavailable(msg) if msg == "down"));
    }

    #[tokio::test]
    async fn delete_confirms_with_message() {
        let svc = service();
        let record = svc.create_record(&RecordPatch::default()).await.unwrap();

        let confirmation = svc.delete_record(record.id.as_str()).await.unwrap();
        assert_eq!(confirmation.message, "Poultry data deleted");
    }
}
