// # poultry-core
//
// Core library for poultry production record keeping.
//
// ## Architecture Overview
//
// - **RecordStore**: Trait for the document store holding the record collection
// - **RecordService**: Service-side list/create/update/delete with error taxonomy
// - **RecordApi**: Trait the client uses to reach the service (HTTP or in-process)
// - **RecordSync**: Client state container (cache, form, mode, error flag)
// - **StoreRegistry**: Factory registry that builds stores from configuration
//
// ## Design Principles
//
// 1. **Store is the source of truth**: the client cache is rebuilt after every write
// 2. **Traits at the seams**: stores and transports are swappable
// 3. **Library-First**: the daemon is a thin layer over this crate

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;
pub mod sync;
pub mod traits;

// Re-export core types for convenience
pub use config::{PoultryConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use model::{Field, ProductionFields, ProductionRecord, RecordId, RecordPatch};
pub use registry::StoreRegistry;
pub use service::RecordService;
pub use store::{FileRecordStore, MemoryRecordStore};
pub use sync::{ClientState, FormFields, FormMode, RecordSync};
pub use traits::{RecordApi, RecordStore};
