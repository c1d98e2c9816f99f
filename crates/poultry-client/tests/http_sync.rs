//! End-to-end: client state driven over HTTP against a live router.

use poultry_client::HttpRecordApi;
use poultry_core::model::{Field, RecordId};
use poultry_core::sync::{DELETE_ERROR, FormMode, LOAD_ERROR, UPDATE_ERROR};
use poultry_core::traits::RecordApi;
use poultry_core::{Error, MemoryRecordStore, RecordService, RecordSync};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve a fresh in-memory service on an ephemeral port
async fn spawn_server() -> String {
    let service = RecordService::new(Arc::new(MemoryRecordStore::new()));
    let app = poultry_api::router(service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn create_edit_delete_cycle() {
    let base = spawn_server().await;
    let mut client = RecordSync::new(HttpRecordApi::new(&base).unwrap());

    assert!(client.load().await);
    assert!(client.state().cache().is_empty());

    client.set_field(Field::ProductionNumber, "1");
    client.set_field(Field::NumberOfHens, "50");
    client.set_field(Field::EggsLaid, "40");
    client.set_field(Field::VaccinationDate, "2024-01-01");
    assert!(client.submit().await);

    let record = client.state().cache()[0].clone();
    assert_eq!(record.fields.number_of_hens, Some(50.0));
    assert_eq!(record.fields.display(Field::VaccinationDate), "2024-01-01");

    assert!(client.begin_edit(&record.id));
    client.set_field(Field::NumberOfHens, "55");
    client.set_field(Field::EggsLaid, "");
    assert!(client.submit().await);

    let updated = &client.state().cache()[0];
    assert_eq!(updated.id, record.id);
    assert_eq!(updated.fields.number_of_hens, Some(55.0));
    assert_eq!(updated.fields.eggs_laid, None, "blank slot clears the field");
    assert_eq!(client.state().mode(), &FormMode::Creating);

    assert!(client.delete(&record.id).await);
    assert!(client.state().cache().is_empty());
    assert_eq!(client.state().error(), None);
}

#[tokio::test]
async fn server_errors_map_to_core_errors() {
    let base = spawn_server().await;
    let api = HttpRecordApi::new(&base).unwrap();
    let absent = RecordId::generate();

    let result = api.delete(&absent).await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    let result = api.update(&absent, &Default::default()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn stale_edit_and_delete_set_error_flag() {
    let base = spawn_server().await;
    let mut client = RecordSync::new(HttpRecordApi::new(&base).unwrap());
    let other = HttpRecordApi::new(&base).unwrap();

    client.set_field(Field::EggsLaid, "1");
    client.submit().await;
    let id = client.state().cache()[0].id.clone();

    client.begin_edit(&id);
    other.delete(&id).await.unwrap();

    assert!(!client.submit().await);
    assert_eq!(client.state().error(), Some(UPDATE_ERROR));

    assert!(!client.delete(&id).await);
    assert_eq!(client.state().error(), Some(DELETE_ERROR));
}

#[tokio::test]
async fn unreachable_service_sets_load_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpRecordApi::with_timeout(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let mut client = RecordSync::new(api);

    assert!(!client.load().await);
    assert_eq!(client.state().error(), Some(LOAD_ERROR));
    assert!(client.state().cache().is_empty());
}
