//! Record store contract and the in-process document store.
//!
//! # Design
//! The service only ever talks to `dyn TodoStore`, so the backing database is
//! picked once at startup and injected. Lookups by an unknown id return
//! `Ok(None)` rather than an error; turning absence into `NotFound` is the
//! service's job. `update` and `delete` return the record as the store sees it
//! after the operation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, TodoError};
use crate::types::{Document, Todo};

/// Operations the todo service needs from a record store.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, in the store's native order.
    async fn find_many(&self) -> Result<Vec<Todo>>;

    /// The record with `id`, or `None` if there is none.
    async fn find_unique(&self, id: &str) -> Result<Option<Todo>>;

    /// Insert `data` as a new record; the store assigns the id.
    async fn create(&self, data: Document) -> Result<Todo>;

    /// Overwrite the fields present in `data` on record `id`.
    async fn update(&self, id: &str, data: Document) -> Result<Todo>;

    /// Remove record `id` and return it.
    async fn delete(&self, id: &str) -> Result<Todo>;

    /// Release the store's connections. Called once at shutdown.
    async fn close(&self) {}
}

/// Fresh record id: 32 lowercase hex characters.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Document store held in process memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn doc_id(doc: &Document) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_many(&self) -> Result<Vec<Todo>> {
        let docs = self.docs.read().await;
        docs.iter().cloned().map(Todo::from_document).collect()
    }

    async fn find_unique(&self, id: &str) -> Result<Option<Todo>> {
        let docs = self.docs.read().await;
        docs.iter()
            .find(|doc| doc_id(doc) == Some(id))
            .cloned()
            .map(Todo::from_document)
            .transpose()
    }

    async fn create(&self, mut data: Document) -> Result<Todo> {
        data.insert("id".to_string(), Value::String(new_id()));
        // Validate the shape before it is stored.
        let todo = Todo::from_document(data.clone())?;
        self.docs.write().await.push(data);
        Ok(todo)
    }

    async fn update(&self, id: &str, data: Document) -> Result<Todo> {
        let mut docs = self.docs.write().await;
        let doc = docs
            .iter_mut()
            .find(|doc| doc_id(doc) == Some(id))
            .ok_or_else(|| TodoError::not_found(id))?;

        let mut updated = doc.clone();
        for (key, value) in data {
            if key != "id" {
                updated.insert(key, value);
            }
        }
        let todo = Todo::from_document(updated.clone())?;
        *doc = updated;
        Ok(todo)
    }

    async fn delete(&self, id: &str) -> Result<Todo> {
        let mut docs = self.docs.write().await;
        let index = docs
            .iter()
            .position(|doc| doc_id(doc) == Some(id))
            .ok_or_else(|| TodoError::not_found(id))?;
        Todo::from_document(docs.remove(index))
    }
}
