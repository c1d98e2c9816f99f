// # Poultry Record Client
//
// HTTP implementation of `RecordApi` plus a text rendering of the client
// state.
//
// ## Behaviour
//
// - One HTTP request per operation
// - Request timeout (30 seconds by default)
// - Non-success responses are mapped back onto the core error taxonomy,
//   carrying the server's `message` field
// - No retries and no caching; `RecordSync` owns all client state
//
// ## Endpoints
//
// - `GET /poultry`
// - `POST /poultry`
// - `PUT /poultry/{id}`
// - `DELETE /poultry/{id}`

pub mod table;

use async_trait::async_trait;
use poultry_core::model::{ProductionRecord, RecordId, RecordPatch};
use poultry_core::traits::{DeleteConfirmation, RecordApi};
use poultry_core::{Error, Result};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default HTTP timeout for requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Message the service sends for a malformed delete id
const INVALID_ID_MESSAGE: &str = "Invalid Poultry ID";

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    error: Option<String>,
}

/// Record service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    /// Base URL without trailing slash, e.g. `http://localhost:3000`
    base_url: String,

    client: reqwest::Client,
}

impl HttpRecordApi {
    /// Create a client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::config("Record service URL cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/poultry", self.base_url)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/poultry/{}", self.base_url, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.json::<ErrorBody>().await.ok();
        Err(status_error(status, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::http(format!("Failed to parse response: {}", e)))
    }
}

/// Map a non-success response onto the core taxonomy
fn status_error(status: StatusCode, body: Option<ErrorBody>) -> Error {
    let (message, detail) = match body {
        Some(ErrorBody { message, error }) => (message, error),
        None => (status.to_string(), None),
    };
    let full = match &detail {
        Some(detail) => format!("{}: {}", message, detail),
        None => message.clone(),
    };

    match status {
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::BAD_REQUEST if message == INVALID_ID_MESSAGE => Error::invalid_id(full),
        StatusCode::BAD_REQUEST => Error::invalid_payload(full),
        s if s.is_server_error() => Error::store(full),
        s => Error::http(format!("{} - {}", s, full)),
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn list(&self) -> Result<Vec<ProductionRecord>> {
        tracing::debug!("GET {}", self.collection_url());
        let response = self.send(self.client.get(self.collection_url())).await?;
        Self::decode(response).await
    }

    async fn create(&self, payload: &RecordPatch) -> Result<ProductionRecord> {
        tracing::debug!("POST {}", self.collection_url());
        let response = self
            .send(self.client.post(self.collection_url()).json(payload))
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &RecordId, payload: &RecordPatch) -> Result<ProductionRecord> {
        tracing::debug!("PUT {}", self.record_url(id));
        let response = self
            .send(self.client.put(self.record_url(id)).json(payload))
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &RecordId) -> Result<DeleteConfirmation> {
        tracing::debug!("DELETE {}", self.record_url(id));
        let response = self.send(self.client.delete(self.record_url(id))).await?;
        Self::decode(response).await
    }
}
