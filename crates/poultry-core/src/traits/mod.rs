//! Core traits for the poultry record system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordStore`]: Document store holding the record collection
//! - [`RecordApi`]: Remote operations the client performs against the service

pub mod record_api;
pub mod record_store;

pub use record_api::{DeleteConfirmation, RecordApi};
pub use record_store::{RecordStore, RecordStoreFactory};
