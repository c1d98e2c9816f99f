//! HTTP routes for the poultry record service
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/poultry` | 200, every record |
//! | POST | `/poultry` | 201, created record |
//! | PUT | `/poultry/{id}` | 200, updated record |
//! | DELETE | `/poultry/{id}` | 200, confirmation message |
//! | GET | `/health` | 200, `{"status": "ok"}` |
//!
//! Bodies are taken as raw JSON and coerced field by field, so `"50"` and
//! `50` are both accepted for numeric attributes.

pub mod error;

pub use error::{ApiError, Operation};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use poultry_core::model::{ProductionRecord, RecordPatch};
use poultry_core::traits::DeleteConfirmation;
use poultry_core::RecordService;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::debug;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build the application router over a record service
pub fn router(service: RecordService) -> Router {
    Router::new()
        .route("/poultry", get(list_records).post(create_record))
        .route("/poultry/{id}", put(update_record).delete(delete_record))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_records(State(service): State<RecordService>) -> ApiResult<Json<Vec<ProductionRecord>>> {
    let records = service
        .list_records()
        .await
        .map_err(|e| ApiError::from_core(Operation::List, e))?;
    Ok(Json(records))
}

async fn create_record(
    State(service): State<RecordService>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductionRecord>)> {
    let payload = decode(Operation::Create, body)?;
    let record = service
        .create_record(&payload)
        .await
        .map_err(|e| ApiError::from_core(Operation::Create, e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(service): State<RecordService>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ProductionRecord>> {
    let payload = decode(Operation::Update, body)?;
    let record = service
        .update_record(&id, &payload)
        .await
        .map_err(|e| ApiError::from_core(Operation::Update, e))?;
    Ok(Json(record))
}

async fn delete_record(
    State(service): State<RecordService>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let confirmation = service
        .delete_record(&id)
        .await
        .map_err(|e| ApiError::from_core(Operation::Delete, e))?;
    Ok(Json(confirmation))
}

fn decode(op: Operation, body: Result<Json<Value>, JsonRejection>) -> ApiResult<RecordPatch> {
    let Json(value) = body.map_err(|rejection| ApiError::from_rejection(op, rejection))?;
    debug!("{:?} payload: {}", op, value);
    RecordPatch::from_json(&value).map_err(|e| ApiError::from_core(op, e))
}
