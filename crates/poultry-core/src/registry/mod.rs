//! Plugin-based store registry
//!
//! The registry maps store type names to factories so the daemon can build a
//! store from configuration without hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poultry_core::{StoreConfig, StoreRegistry};
//!
//! let registry = StoreRegistry::with_builtin();
//! let store = registry.create_store(&StoreConfig::Memory).await?;
//! ```

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::store::{FileRecordStoreFactory, MemoryRecordStoreFactory};
use crate::traits::{RecordStore, RecordStoreFactory};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry of record store factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<String, Arc<dyn RecordStoreFactory>>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the bundled `memory` and `file` stores
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register_store("memory", Box::new(MemoryRecordStoreFactory));
        registry.register_store("file", Box::new(FileRecordStoreFactory));
        registry
    }

    /// Register a store factory under a type name
    pub fn register_store(&self, name: impl Into<String>, factory: Box<dyn RecordStoreFactory>) {
        let name = name.into();
        let mut stores = self
            .stores
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        stores.insert(name, Arc::from(factory));
    }

    /// Create a store from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordStore>)`: Created store instance
    /// - `Err(Error)`: If the type is not registered or creation fails
    pub async fn create_store(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
        let store_type = config.type_name();

        let factory = {
            let stores = self
                .stores
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            stores
                .get(store_type)
                .cloned()
                .ok_or_else(|| Error::config(format!("Unknown store type: {}", store_type)))?
        };

        factory.create(config).await
    }

    /// List all registered store types
    pub fn list_stores(&self) -> Vec<String> {
        let stores = self
            .stores
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        stores.keys().cloned().collect()
    }

    /// Check if a store type is registered
    pub fn has_store(&self, name: &str) -> bool {
        let stores = self
            .stores
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        stores.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_registration() {
        let registry = StoreRegistry::new();
        assert!(!registry.has_store("memory"));

        registry.register_store("memory", Box::new(MemoryRecordStoreFactory));

        assert!(registry.has_store("memory"));
        assert!(registry.list_stores().contains(&"memory".to_string()));
    }

    #[tokio::test]
    async fn test_registry_builds_builtin_stores() {
        let registry = StoreRegistry::with_builtin();
        let store = registry.create_store(&StoreConfig::Memory).await.unwrap();
        assert_eq!(store.store_name(), "memory");

        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::File {
            path: dir.path().join("r.json").display().to_string(),
        };
        let store = registry.create_store(&config).await.unwrap();
        assert_eq!(store.store_name(), "file");
    }

    #[tokio::test]
    async fn test_registry_unknown_type() {
        let registry = StoreRegistry::new();
        let result = registry.create_store(&StoreConfig::Memory).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
