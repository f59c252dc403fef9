//! Builds the `{status_code, msg, data}` response every route returns.
//!
//! The HTTP status line always mirrors `status_code` in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use todo_core::Envelope;

/// 200 envelope carrying `data`.
pub fn succeed<T: Serialize>(data: T) -> Response {
    respond(Envelope::succeed(data))
}

/// Error envelope with `data: null`.
pub fn failed(status: StatusCode, msg: impl Into<String>) -> Response {
    respond(Envelope::<()>::failed(status.as_u16(), msg))
}

fn respond<T: Serialize>(envelope: Envelope<T>) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}
