//! Client-side record synchronization
//!
//! [`RecordSync`] owns the client's [`ClientState`] and is the only way to
//! mutate it. The state is changed exclusively through the named operations:
//!
//! - [`RecordSync::load`]: replace the cache with a fresh list (last known
//!   good on failure)
//! - [`RecordSync::begin_edit`]: copy a cached record into the form
//! - [`RecordSync::set_field`]: form input
//! - [`RecordSync::submit`]: create or update, then reload
//! - [`RecordSync::delete`]: delete, then reload
//! - [`RecordSync::cancel_edit`]: back to a blank create form
//!
//! ## Consistency
//!
//! The cache is never patched locally. After every successful mutation it is
//! rebuilt from one full list round-trip, so the displayed rows are always
//! store-confirmed.
//!
//! ## Scheduling
//!
//! Operations take `&mut self`, so one runs to completion (network included)
//! before the next can start. No timeouts or retries are applied here.

mod form;

pub use form::FormFields;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Field, ProductionRecord, RecordId};
use crate::traits::RecordApi;

/// Error flag text after a failed load
pub const LOAD_ERROR: &str = "Error fetching production data. Please try again later.";
/// Error flag text after a failed create
pub const CREATE_ERROR: &str = "Error adding production data. Please try again.";
/// Error flag text after a failed update
pub const UPDATE_ERROR: &str = "Error updating production data. Please try again.";
/// Error flag text after a failed delete
pub const DELETE_ERROR: &str = "Error deleting production data. Please try again.";

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(RecordId),
}

impl FormMode {
    /// Label for the form's submit button
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Creating => "Submit",
            FormMode::Editing(_) => "Update",
        }
    }
}

/// Everything the client holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    cache: Vec<ProductionRecord>,
    form: FormFields,
    mode: FormMode,
    error: Option<String>,
}

impl ClientState {
    /// Last full list received
    pub fn cache(&self) -> &[ProductionRecord] {
        &self.cache
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Error flag shown above the form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn reset_form(&mut self) {
        self.form = FormFields::default();
        self.mode = FormMode::Creating;
    }
}

/// Client state container driven through a [`RecordApi`]
pub struct RecordSync<A> {
    api: A,
    state: ClientState,
}

impl<A: RecordApi> RecordSync<A> {
    /// Create a client with an empty cache and a blank form
    ///
    /// Call [`load`](Self::load) to populate the cache.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::default(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the full list
    ///
    /// On success the cache is replaced wholesale and the error flag cleared.
    /// On failure the error flag is set and the previous cache kept.
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(records) => {
                debug!("Loaded {} records", records.len());
                self.state.cache = records;
                self.state.error = None;
                true
            }
            Err(e) => {
                warn!("Error fetching production data: {}", e);
                self.state.error = Some(LOAD_ERROR.to_string());
                false
            }
        }
    }

    /// Populate the form from a cached record
    ///
    /// Returns `false` when `id` is not in the cache (e.g. deleted by another
    /// client); form, mode and error flag are then left unchanged.
    pub fn begin_edit(&mut self, id: &RecordId) -> bool {
        let Some(record) = self.state.cache.iter().find(|r| &r.id == id) else {
            debug!("Record {} not in cache, edit ignored", id);
            return false;
        };

        self.state.form = FormFields::from_record(record);
        self.state.mode = FormMode::Editing(id.clone());
        true
    }

    /// Overwrite one form slot
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.form.set(field, value);
    }

    /// Discard form input and return to create mode
    pub fn cancel_edit(&mut self) {
        self.state.reset_form();
    }

    /// Create or update from the form, then reload
    ///
    /// On failure the error flag names the operation and the form and mode
    /// are kept for retry.
    pub async fn submit(&mut self) -> bool {
        let outcome = self.send_form().await;
        match outcome {
            Ok(record) => {
                debug!("Submitted record {}", record.id);
                self.state.reset_form();
                self.load().await;
                true
            }
            Err(e) => {
                let message = match self.state.mode {
                    FormMode::Creating => CREATE_ERROR,
                    FormMode::Editing(_) => UPDATE_ERROR,
                };
                warn!("Error submitting data: {}", e);
                self.state.error = Some(message.to_string());
                false
            }
        }
    }

    /// Delete a record, then reload
    ///
    /// A failed delete sets the error flag; the cache is left as it was.
    pub async fn delete(&mut self, id: &RecordId) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(e) => {
                warn!("Error deleting data: {}", e);
                self.state.error = Some(DELETE_ERROR.to_string());
                false
            }
        }
    }

    async fn send_form(&self) -> Result<ProductionRecord> {
        let payload = self.state.form.to_patch()?;
        match &self.state.mode {
            FormMode::Creating => self.api.create(&payload).await,
            FormMode::Editing(id) => self.api.update(id, &payload).await,
        }
    }
}
