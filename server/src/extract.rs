//! Extractors whose rejections are `AppError` envelopes.
//!
//! `ValidJson` checks a `RequestModel`'s field rules before deserializing, so
//! a bad payload never reaches a handler. `ValidPath` wraps axum's `Path`.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use todo_core::{FieldError, RequestModel};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: RequestModel,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![FieldError::body(rejection.body_text())]))?;

        // An absent body reads as `null` and is reported as a missing field.
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|_| AppError::Validation(vec![FieldError::body("JSON decode error")]))?
        };

        let errors = T::field_errors(&body);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        serde_json::from_value(body)
            .map(ValidJson)
            .map_err(|e| AppError::Validation(vec![FieldError::body(e.to_string())]))
    }
}

#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => Err(AppError::Rejected {
                status: rejection.status(),
                msg: rejection.body_text(),
            }),
        }
    }
}
