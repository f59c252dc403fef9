//! Error types for the todo service and its API client.
//!
//! # Design
//! `TodoError` is the domain taxonomy raised by the service and the record
//! stores. Each variant owns its HTTP status so the router maps errors in one
//! place. `NotFound` and `AlreadyExists` carry fixed user-facing messages; the
//! offending id/title is kept for logs only. Everything the store reports
//! lands in `Store` with the driver's own description, which is surfaced
//! verbatim to callers as a 500.
//!
//! `ApiError` is the client-side view of the same taxonomy, decoded from the
//! response envelope's `status_code`.

use thiserror::Error;

/// Result alias for service and store operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Domain errors raised by `TodoService` and `TodoStore` implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoError {
    /// Lookup by id found no record.
    #[error("Todo not found")]
    NotFound { id: String },

    /// A todo with the same title already exists.
    #[error("Todo already exists. Use a different title.")]
    AlreadyExists { title: String },

    /// Any failure reported by the record store.
    #[error("{0}")]
    Store(String),
}

impl TodoError {
    pub fn not_found(id: impl Into<String>) -> Self {
        TodoError::NotFound { id: id.into() }
    }

    pub fn already_exists(title: impl Into<String>) -> Self {
        TodoError::AlreadyExists {
            title: title.into(),
        }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        TodoError::Store(msg.into())
    }

    /// HTTP status code the router answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound { .. } => 404,
            TodoError::AlreadyExists { .. } => 400,
            TodoError::Store(_) => 500,
        }
    }
}

impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self {
        TodoError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        TodoError::Store(format!("malformed todo record: {err}"))
    }
}

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 404.
    #[error("{0}")]
    NotFound(String),

    /// The server answered 400 for a duplicate title.
    #[error("{0}")]
    AlreadyExists(String),

    /// The server rejected the payload with 422.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other non-success envelope.
    #[error("HTTP {status}: {msg}")]
    HttpError { status: u16, msg: String },

    /// The response body was not a valid envelope of the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
