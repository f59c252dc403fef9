//! Core of the todo service: models, record stores, business rules, and a
//! client for the HTTP surface.
//!
//! # Overview
//! - `types`: the `Todo` record, request/response models, the envelope.
//! - `store`: the `TodoStore` contract and the in-memory document store.
//! - `sqlite`: a `TodoStore` backed by SQLite.
//! - `service`: `TodoService`, existence checks and error translation.
//! - `client`: host-does-IO client for `/api/v1/todo`.
//!
//! # Design
//! Nothing here knows about axum. The server crate owns routing and turns
//! `TodoError` into envelopes via `TodoError::status_code`.

pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod sqlite;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, Result, TodoError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TodoService;
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, TodoStore};
pub use types::{
    CreateTodoRequest, Document, Envelope, FieldError, RequestModel, Todo, TodoListResponse,
    TodoResponse, UpdateTodoRequest,
};
