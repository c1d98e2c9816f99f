//! Contract Test: Client Synchronization
//!
//! Verifies the client's load / begin-edit / submit / delete cycle.
//!
//! Constraints verified:
//! - A failed load keeps the last known good cache and sets the error flag
//! - Every successful mutation is followed by exactly one full list
//! - Failed submits keep form input and mode for retry
//! - Begin edit on an id missing from the cache changes nothing

mod common;

use common::*;
use poultry_core::model::{Field, RecordId};
use poultry_core::sync::{CREATE_ERROR, DELETE_ERROR, FormMode, LOAD_ERROR, UPDATE_ERROR};
use poultry_core::traits::RecordApi;

#[tokio::test]
async fn failed_load_keeps_last_known_good_cache() {
    let (mut client, store) = client_with_store();
    client.api().create(&sample_payload()).await.unwrap();

    assert!(client.load().await);
    let before = client.state().cache().to_vec();
    assert_eq!(before.len(), 1);

    store.set_down(true);
    assert!(!client.load().await);

    assert_eq!(client.state().cache(), before.as_slice(), "table must not go blank");
    assert_eq!(client.state().error(), Some(LOAD_ERROR));

    store.set_down(false);
    assert!(client.load().await);
    assert_eq!(client.state().error(), None, "successful load clears the flag");
}

#[tokio::test]
async fn each_mutation_is_followed_by_one_full_list() {
    let (mut client, store) = client_with_store();

    client.set_field(Field::EggsLaid, "40");
    assert!(client.submit().await);
    assert_eq!(store.list_calls(), 1);

    let id = client.state().cache()[0].id.clone();
    client.begin_edit(&id);
    client.set_field(Field::EggsLaid, "41");
    assert!(client.submit().await);
    assert_eq!(store.list_calls(), 2);

    assert!(client.delete(&id).await);
    assert_eq!(store.list_calls(), 3);
    assert!(client.state().cache().is_empty());
}

#[tokio::test]
async fn cache_reflects_other_clients_after_reload() {
    let (mut client, _store) = client_with_store();
    client.load().await;

    // Another writer goes straight to the service
    client.api().create(&sample_payload()).await.unwrap();
    assert!(client.state().cache().is_empty(), "no local prediction");

    client.set_field(Field::EggsLaid, "1");
    client.submit().await;
    assert_eq!(client.state().cache().len(), 2);
}

#[tokio::test]
async fn failed_create_keeps_form() {
    let (mut client, store) = client_with_store();
    client.set_field(Field::NumberOfHens, "50");
    store.set_down(true);

    assert!(!client.submit().await);

    assert_eq!(client.state().error(), Some(CREATE_ERROR));
    assert_eq!(client.state().form().get(Field::NumberOfHens), "50");
    assert_eq!(client.state().mode(), &FormMode::Creating);

    store.set_down(false);
    assert!(client.submit().await, "retry with preserved input succeeds");
    assert_eq!(client.state().cache().len(), 1);
}

#[tokio::test]
async fn failed_update_keeps_form_and_editing_mode() {
    let (mut client, store) = client_with_store();
    client.api().create(&sample_payload()).await.unwrap();
    client.load().await;
    let id = client.state().cache()[0].id.clone();

    client.begin_edit(&id);
    client.set_field(Field::NumberOfHens, "55");
    store.set_down(true);

    assert!(!client.submit().await);

    assert_eq!(client.state().error(), Some(UPDATE_ERROR));
    assert_eq!(client.state().mode(), &FormMode::Editing(id));
    assert_eq!(client.state().form().get(Field::NumberOfHens), "55");
}

#[tokio::test]
async fn update_of_record_deleted_elsewhere_fails_as_update() {
    let (mut client, _store) = client_with_store();
    client.api().create(&sample_payload()).await.unwrap();
    client.load().await;
    let id = client.state().cache()[0].id.clone();

    client.begin_edit(&id);
    client.api().delete(&id).await.unwrap();

    assert!(!client.submit().await);
    assert_eq!(client.state().error(), Some(UPDATE_ERROR));
}

#[tokio::test]
async fn begin_edit_unknown_id_changes_nothing() {
    let (mut client, _store) = client_with_store();
    client.set_field(Field::EggsLaid, "7");
    let before = client.state().clone();

    assert!(!client.begin_edit(&RecordId::generate()));

    assert_eq!(client.state(), &before);
}

#[tokio::test]
async fn failed_delete_sets_error_and_keeps_cache() {
    let (mut client, store) = client_with_store();
    client.api().create(&sample_payload()).await.unwrap();
    client.load().await;
    let id = client.state().cache()[0].id.clone();

    store.set_down(true);
    assert!(!client.delete(&id).await);

    assert_eq!(client.state().error(), Some(DELETE_ERROR));
    assert_eq!(client.state().cache().len(), 1);
}
