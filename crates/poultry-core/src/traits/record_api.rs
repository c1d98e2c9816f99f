// # Record API Trait
//
// The four remote operations the client performs against the record service.
//
// `poultry-client` implements this over HTTP; `RecordService` implements it
// in-process so the synchronization contract can be exercised without a
// network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{ProductionRecord, RecordId, RecordPatch};

/// Body returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub fn deleted() -> Self {
        Self {
            message: "Poultry data deleted".to_string(),
        }
    }
}

/// Remote record operations
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Fetch the full record list
    async fn list(&self) -> Result<Vec<ProductionRecord>, crate::Error>;

    /// Create a record from a payload without id
    async fn create(&self, payload: &RecordPatch) -> Result<ProductionRecord, crate::Error>;

    /// Apply a payload to an existing record
    async fn update(
        &self,
        id: &RecordId,
        payload: &RecordPatch,
    ) -> Result<ProductionRecord, crate::Error>;

    /// Delete a record by id
    async fn delete(&self, id: &RecordId) -> Result<DeleteConfirmation, crate::Error>;
}
