//! Test doubles and common utilities for contract tests
//!
//! This module provides a store wrapper that counts calls and can be switched
//! into a failing state to simulate the store going down.

#![allow(dead_code)]

use async_trait::async_trait;
use poultry_core::error::{Error, Result};
use poultry_core::model::{ProductionFields, ProductionRecord, RecordId, RecordPatch};
use poultry_core::store::MemoryRecordStore;
use poultry_core::traits::RecordStore;
use poultry_core::{RecordService, RecordSync};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Memory store that counts calls and can be taken "down"
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryRecordStore,
    down: AtomicBool,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Total number of calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
            + self.insert_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.remove_calls.load(Ordering::SeqCst)
    }

    fn check(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            Err(Error::store("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn list(&self) -> Result<Vec<ProductionRecord>> {
        self.check(&self.list_calls)?;
        self.inner.list().await
    }

    async fn insert(&self, fields: ProductionFields) -> Result<ProductionRecord> {
        self.check(&self.insert_calls)?;
        self.inner.insert(fields).await
    }

    async fn update(&self, id: &RecordId, patch: &RecordPatch) -> Result<Option<ProductionRecord>> {
        self.check(&self.update_calls)?;
        self.inner.update(id, patch).await
    }

    async fn remove(&self, id: &RecordId) -> Result<Option<ProductionRecord>> {
        self.check(&self.remove_calls)?;
        self.inner.remove(id).await
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "counting"
    }
}

/// Service over a fresh counting store
pub fn service_with_store() -> (RecordService, Arc<CountingStore>) {
    let store = CountingStore::new();
    (RecordService::new(store.clone()), store)
}

/// Client wired in-process to a fresh counting store
pub fn client_with_store() -> (RecordSync<RecordService>, Arc<CountingStore>) {
    let (service, store) = service_with_store();
    (RecordSync::new(service), store)
}

/// The canonical record payload used across scenarios
pub fn sample_payload() -> RecordPatch {
    RecordPatch::from_json(&json!({
        "productionNumber": 1,
        "numberOfHens": 50,
        "eggsLaid": 40,
        "quantityOfMeatSold": 0,
        "feedConsumption": 10,
        "waterConsumption": 20,
        "mortalityRate": 0,
        "vaccinationDate": "2024-01-01"
    }))
    .expect("sample payload coerces")
}
