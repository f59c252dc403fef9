//! `SqliteStore` against fresh in-memory databases.
//!
//! Each test connects to its own `sqlite::memory:` database, so tests run in
//! parallel without sharing rows.

use serde_json::json;
use todo_core::{
    CreateTodoRequest, Document, SqliteStore, TodoError, TodoService, TodoStore, UpdateTodoRequest,
};

async fn store() -> SqliteStore {
    SqliteStore::connect("sqlite::memory:").await.unwrap()
}

fn doc(value: serde_json::Value) -> Document {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn starts_empty() {
    let store = store().await;
    assert!(store.find_many().await.unwrap().is_empty());
    assert!(store.find_unique("xyz").await.unwrap().is_none());
}

#[tokio::test]
async fn databases_are_isolated_per_connect() {
    let a = store().await;
    let b = store().await;
    a.create(doc(json!({"title": "only in a", "content": ""})))
        .await
        .unwrap();
    assert!(b.find_many().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_find() {
    let store = store().await;
    let created = store
        .create(doc(json!({"title": "Test", "content": "Mocked content"})))
        .await
        .unwrap();

    assert_eq!(created.id.len(), 32);
    assert_eq!(created.title, "Test");
    assert_eq!(created.content, "Mocked content");
    assert_eq!(store.find_unique(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn create_requires_both_fields() {
    let store = store().await;
    let err = store
        .create(doc(json!({"title": "No content"})))
        .await
        .unwrap_err();
    assert_eq!(err, TodoError::store("missing field `content`"));
}

#[tokio::test]
async fn find_many_returns_insertion_order() {
    let store = store().await;
    for title in ["first", "second", "third"] {
        store
            .create(doc(json!({"title": title, "content": "x"})))
            .await
            .unwrap();
    }
    let titles: Vec<String> = store
        .find_many()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let store = store().await;
    let created = store
        .create(doc(json!({"title": "Title", "content": "Content"})))
        .await
        .unwrap();

    let updated = store
        .update(&created.id, doc(json!({"title": "New Title"})))
        .await
        .unwrap();
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.content, "Content");

    let unchanged = store.update(&created.id, Document::new()).await.unwrap();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn update_and_delete_returns_match_stored_state() {
    let store = store().await;
    let created = store
        .create(doc(json!({"title": "Title", "content": "Content"})))
        .await
        .unwrap();

    let updated = store
        .update(&created.id, doc(json!({"content": "Changed"})))
        .await
        .unwrap();
    assert_eq!(
        store.find_unique(&created.id).await.unwrap(),
        Some(updated.clone())
    );

    let deleted = store.delete(&created.id).await.unwrap();
    assert_eq!(deleted, updated);
    assert!(store.find_unique(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn null_update_fails_and_keeps_row() {
    let store = store().await;
    let created = store
        .create(doc(json!({"title": "Title", "content": "Content"})))
        .await
        .unwrap();

    let err = store
        .update(&created.id, doc(json!({"title": null})))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::Store(_)), "{err:?}");
    assert_eq!(store.find_unique(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let store = store().await;
    assert!(matches!(
        store.update("xyz", doc(json!({"title": "x"}))).await,
        Err(TodoError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete("xyz").await,
        Err(TodoError::NotFound { .. })
    ));
}

#[tokio::test]
async fn service_runs_on_sqlite() {
    let service = TodoService::new(std::sync::Arc::new(store().await));
    let created = service
        .create_todo(CreateTodoRequest {
            title: "Title".to_string(),
            content: "Content".to_string(),
        })
        .await
        .unwrap();

    let updated = service
        .update_todo(
            &created.id,
            UpdateTodoRequest {
                title: None,
                content: Some("Updated Content".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Title");
    assert_eq!(updated.content, "Updated Content");

    service.delete_todo(&created.id).await.unwrap();
    assert_eq!(
        service.delete_todo(&created.id).await.unwrap_err(),
        TodoError::not_found(created.id.as_str())
    );
}

#[tokio::test]
async fn closed_store_reports_store_errors() {
    let store = store().await;
    store.close().await;
    let err = store.find_many().await.unwrap_err();
    assert_eq!(err.status_code(), 500);
}
