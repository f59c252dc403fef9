//! Stateless request builder and envelope parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`. Errors are read from the envelope's
//! `status_code`, which the server keeps equal to the HTTP status line.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodoRequest, Envelope, TodoListResponse, TodoResponse, UpdateTodoRequest};

/// Route prefix of the todo collection.
pub const TODO_PATH: &str = "/api/v1/todo";

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{TODO_PATH}", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{TODO_PATH}/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.collection_url())
    }

    pub fn build_create_todo(&self, input: &CreateTodoRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection_url(), body))
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodoRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item_url(id), body))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<TodoListResponse, ApiError> {
        parse_envelope::<Vec<TodoResponse>>(response).map(TodoListResponse::from)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoResponse, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<TodoResponse, ApiError> {
        parse_envelope(response)
    }
}

/// Decode an envelope and turn a non-200 `status_code` into an `ApiError`.
fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let envelope: Envelope<T> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        // Not an envelope at all, e.g. a 405 from the framework.
        Err(_) if response.status != 200 => {
            return Err(ApiError::HttpError {
                status: response.status,
                msg: response.body,
            })
        }
        Err(e) => return Err(ApiError::DeserializationError(e.to_string())),
    };

    match envelope.status_code {
        200 => envelope
            .data
            .ok_or_else(|| ApiError::DeserializationError("envelope has no data".to_string())),
        404 => Err(ApiError::NotFound(envelope.msg)),
        400 => Err(ApiError::AlreadyExists(envelope.msg)),
        422 => Err(ApiError::Validation(envelope.msg)),
        status => Err(ApiError::HttpError {
            status,
            msg: envelope.msg,
        }),
    }
}
