//! HTTP error mapping
//!
//! Core errors become a status code plus a `{"message", "error"}` body. The
//! message depends on which route failed, so handlers tag the error with an
//! [`Operation`] before returning it.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use poultry_core::Error;
use serde::Serialize;
use tracing::error;

pub const NOT_FOUND: &str = "Poultry data not found";
pub const INVALID_ID: &str = "Invalid Poultry ID";

/// Route an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> Option<&'static str> {
        match self {
            Operation::List => None,
            Operation::Create => Some("Error adding new poultry data"),
            Operation::Update => Some("Error updating poultry data"),
            Operation::Delete => Some("Error deleting data"),
        }
    }
}

/// Error body sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error = Some(detail.into());
        self
    }

    /// Map a core error raised by `op`
    pub fn from_core(op: Operation, err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::new(StatusCode::NOT_FOUND, NOT_FOUND),
            Error::InvalidIdentifier(detail) => {
                Self::new(StatusCode::BAD_REQUEST, INVALID_ID).with_detail(detail)
            }
            Error::InvalidPayload(detail) => {
                let message = op.failure_message().unwrap_or("Invalid request");
                Self::new(StatusCode::BAD_REQUEST, message).with_detail(detail)
            }
            other => {
                error!("{:?} failed: {}", op, other);
                match op.failure_message() {
                    Some(message) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
                        .with_detail(other.to_string()),
                    None => Self::new(StatusCode::INTERNAL_SERVER_ERROR, raw_message(other)),
                }
            }
        }
    }

    /// Map a body that is not valid JSON
    pub fn from_rejection(op: Operation, rejection: JsonRejection) -> Self {
        let message = op.failure_message().unwrap_or("Invalid request");
        Self::new(StatusCode::BAD_REQUEST, message).with_detail(rejection.body_text())
    }
}

/// Store message without the variant prefix
fn raw_message(err: Error) -> String {
    match err {
        Error::StoreUnavailable(message) => message,
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
