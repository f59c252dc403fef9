//! Maps request failures onto error envelopes.
//!
//! Domain errors keep the status chosen by `TodoError::status_code`; anything
//! the store reports becomes a 500 with the store's own message. Validation
//! failures are collected per field and joined with `"; "`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::{FieldError, TodoError};

use crate::envelope;

#[derive(Debug)]
pub enum AppError {
    /// The request body broke one or more field rules.
    Validation(Vec<FieldError>),
    /// The service failed.
    Todo(TodoError),
    /// axum rejected part of the request before the body was read.
    Rejected { status: StatusCode, msg: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Todo(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Rejected { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            AppError::Todo(err) => err.to_string(),
            AppError::Rejected { msg, .. } => msg.clone(),
        }
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        AppError::Todo(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.message();
        match &self {
            AppError::Todo(TodoError::Store(_)) => {
                tracing::error!(status = status.as_u16(), error = %msg, "todo store failed")
            }
            AppError::Todo(err) => {
                tracing::warn!(status = status.as_u16(), error = ?err, "todo request rejected")
            }
            AppError::Validation(_) => {
                tracing::debug!(error = %msg, "invalid request body")
            }
            AppError::Rejected { .. } => {
                tracing::debug!(status = status.as_u16(), error = %msg, "request rejected")
            }
        }
        envelope::failed(status, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_joined() {
        let err = AppError::Validation(vec![
            FieldError::field("title", "Field required"),
            FieldError::field("content", "Field required"),
        ]);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.message(),
            "body.title: Field required; body.content: Field required"
        );
    }

    #[test]
    fn domain_errors_keep_their_status() {
        let not_found = AppError::from(TodoError::not_found("xyz"));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), "Todo not found");

        let exists = AppError::from(TodoError::already_exists("Test"));
        assert_eq!(exists.status(), StatusCode::BAD_REQUEST);

        let store = AppError::from(TodoError::store("Prisma Error"));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.message(), "Prisma Error");
    }

    #[test]
    fn rejections_keep_axum_status_and_text() {
        let err = AppError::Rejected {
            status: StatusCode::BAD_REQUEST,
            msg: "Invalid URL".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid URL");
    }
}
