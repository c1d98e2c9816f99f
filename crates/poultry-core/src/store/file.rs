// # File Record Store
//
// File-based implementation of RecordStore with crash recovery.
//
// ## Purpose
//
// Persists the record collection across daemon restarts as one JSON document.
//
// ## Crash Recovery
//
// - Atomic writes: write-then-rename
// - Automatic backup: keeps `.backup` of the previous state
// - Recovery: falls back to the backup if the main file fails to parse
//
// ## Write Discipline
//
// Every mutation is applied to a copy of the collection, written to disk, and
// only then committed in memory. A failed write leaves both untouched.
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "records": [
//     { "_id": "0123456789abcdef0123456789abcdef", "numberOfHens": 50.0, "vaccinationDate": "2024-01-01" }
//   ]
// }
// ```

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::config::StoreConfig;
use crate::model::{ProductionFields, ProductionRecord, RecordId, RecordPatch};
use crate::traits::record_store::{RecordStore, RecordStoreFactory};

/// Store file format version
const STORE_FILE_VERSION: &str = "1.0";

type Records = IndexMap<RecordId, ProductionFields>;

/// File-based record store with crash recovery
///
/// # Example
///
/// ```rust,no_run
/// use poultry_core::store::FileRecordStore;
/// use poultry_core::traits::RecordStore;
/// use poultry_core::model::ProductionFields;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileRecordStore::new("/var/lib/poultry/records.json").await?;
///     let record = store.insert(ProductionFields::default()).await?;
///     assert_eq!(store.list().await?, vec![record]);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    records: RwLock<Records>,
}

/// Serializable store file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StoreFileFormat {
    version: String,
    records: Vec<ProductionRecord>,
}

/// Why a store file could not be loaded
enum LoadFailure {
    /// File exists but could not be read
    Unreadable(Error),
    /// File was read but is not a valid store document
    Corrupt(Error),
}

impl FileRecordStore {
    /// Create or load a file store
    ///
    /// This will:
    /// 1. Create parent directories if needed
    /// 2. Load the existing store file
    /// 3. On corruption, load the backup and restore it over the main file
    /// 4. If both fail, start with an empty collection
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let records = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_with_recovery(path: &Path) -> Result<Records, Error> {
        match Self::load(path).await {
            Ok(records) => {
                tracing::debug!("Loaded store file: {} records", records.len());
                Ok(records)
            }
            Err(LoadFailure::Unreadable(e)) => Err(e),
            Err(LoadFailure::Corrupt(e)) => {
                tracing::warn!(
                    "Store file {} appears corrupted: {}. Attempting recovery from backup.",
                    path.display(),
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty store.");
                    return Ok(Records::new());
                }

                match Self::load(&backup_path).await {
                    Ok(records) => {
                        tracing::info!("Recovered store from backup: {} records", records.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore store file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(records)
                    }
                    Err(LoadFailure::Unreadable(e) | LoadFailure::Corrupt(e)) => {
                        tracing::error!("Backup also unusable: {}. Starting with empty store.", e);
                        Ok(Records::new())
                    }
                }
            }
        }
    }

    async fn load(path: &Path) -> Result<Records, LoadFailure> {
        if !path.exists() {
            tracing::debug!("Store file does not exist: {}", path.display());
            return Ok(Records::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            LoadFailure::Unreadable(Error::store(format!(
                "Failed to read store file {}: {}",
                path.display(),
                e
            )))
        })?;

        let file: StoreFileFormat =
            serde_json::from_str(&content).map_err(|e| LoadFailure::Corrupt(Error::Json(e)))?;

        if file.version != STORE_FILE_VERSION {
            tracing::warn!(
                "Store file version mismatch: expected {}, got {}. Attempting to load anyway.",
                STORE_FILE_VERSION,
                file.version
            );
        }

        Ok(file
            .records
            .into_iter()
            .map(|record| (record.id, record.fields))
            .collect())
    }

    /// Write a snapshot atomically (temp file, backup, rename)
    async fn write(&self, records: &Records) -> Result<(), Error> {
        let file = StoreFileFormat {
            version: STORE_FILE_VERSION.to_string(),
            records: records
                .iter()
                .map(|(id, fields)| ProductionRecord::new(id.clone(), fields.clone()))
                .collect(),
        };

        let json = serde_json::to_string_pretty(&file)?;

        let temp_path = self.temp_path();
        if let Err(e) = Self::write_temp(&temp_path, json.as_bytes()).await {
            tracing::warn!("Failed to write temp file {}: {}", temp_path.display(), e);
            Self::discard(&temp_path).await;
            return Err(Error::Io(e));
        }

        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            tracing::warn!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            );
            Self::discard(&temp_path).await;
            return Err(Error::Io(e));
        }

        tracing::trace!("Store written to file: {}", self.path.display());
        Ok(())
    }

    async fn write_temp(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut handle = fs::File::create(temp_path).await?;
        handle.write_all(bytes).await?;
        handle.flush().await
    }

    /// Remove a leftover temp file
    async fn discard(temp_path: &Path) {
        match fs::remove_file(temp_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove temp file {}: {}", temp_path.display(), e),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn list(&self) -> Result<Vec<ProductionRecord>, Error> {
        let guard = self.records.read().await;
        Ok(guard
            .iter()
            .map(|(id, fields)| ProductionRecord::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn insert(&self, fields: ProductionFields) -> Result<ProductionRecord, Error> {
        let mut guard = self.records.write().await;
        let mut id = RecordId::generate();
        while guard.contains_key(&id) {
            id = RecordId::generate();
        }

        let mut next = guard.clone();
        next.insert(id.clone(), fields.clone());
        self.write(&next).await?;
        *guard = next;

        Ok(ProductionRecord::new(id, fields))
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<Option<ProductionRecord>, Error> {
        let mut guard = self.records.write().await;
        let Some(current) = guard.get(id) else {
            return Ok(None);
        };

        let mut fields = current.clone();
        fields.apply(patch);

        let mut next = guard.clone();
        next.insert(id.clone(), fields.clone());
        self.write(&next).await?;
        *guard = next;

        Ok(Some(ProductionRecord::new(id.clone(), fields)))
    }

    async fn remove(&self, id: &RecordId) -> Result<Option<ProductionRecord>, Error> {
        let mut guard = self.records.write().await;
        if !guard.contains_key(id) {
            return Ok(None);
        }

        let mut next = guard.clone();
        let removed = next.shift_remove(id);
        self.write(&next).await?;
        *guard = next;

        Ok(removed.map(|fields| ProductionRecord::new(id.clone(), fields)))
    }

    async fn flush(&self) -> Result<(), Error> {
        let guard = self.records.read().await;
        self.write(&guard).await
    }

    fn store_name(&self) -> &'static str {
        "file"
    }
}

/// Factory for file stores
pub struct FileRecordStoreFactory;

#[async_trait]
impl RecordStoreFactory for FileRecordStoreFactory {
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>, Error> {
        match config {
            StoreConfig::File { path } => {
                let store = FileRecordStore::new(path).await?;
                tracing::info!("File store at {}", store.path().display());
                Ok(Box::new(store))
            }
            _ => Err(Error::config("Invalid config for file store")),
        }
    }
}
