//! Domain records, request/response models, and the response envelope.
//!
//! # Design
//! Stores speak in `Document`s, plain JSON objects, so request models
//! serialize straight into the store's native shape and records come back
//! out through serde. `UpdateTodoRequest` skips unset fields when serializing;
//! that is what makes `PUT` a partial update.
//!
//! Request models also describe their own field rules (`RequestModel`) so the
//! server can report every violated field at once instead of stopping at the
//! first serde error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A record in the store's native shape.
pub type Document = Map<String, Value>;

/// A todo item as persisted by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Todo {
    pub fn from_document(doc: Document) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}

/// Payload for `POST /api/v1/todo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub title: String,
    pub content: String,
}

impl CreateTodoRequest {
    pub fn to_document(&self) -> Document {
        to_document(self)
    }
}

/// Payload for `PUT /api/v1/todo/{id}`. Omitted fields are left out of the
/// document and stay unchanged in the store. An explicit `null` never gets
/// this far: the field rules reject it as a non-string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateTodoRequest {
    pub fn to_document(&self) -> Document {
        to_document(self)
    }
}

fn to_document<T: Serialize>(model: &T) -> Document {
    match serde_json::to_value(model) {
        Ok(Value::Object(doc)) => doc,
        _ => Document::new(),
    }
}

/// A todo as returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            content: todo.content,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    pub todos: Vec<TodoResponse>,
}

impl From<Vec<TodoResponse>> for TodoListResponse {
    fn from(todos: Vec<TodoResponse>) -> Self {
        Self { todos }
    }
}

/// Uniform `{status_code, msg, data}` body carried by every response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub status_code: u16,
    pub msg: String,
    pub data: Option<T>,
}

/// `msg` of every successful envelope.
pub const SUCCEED_MSG: &str = "succeed";

impl<T> Envelope<T> {
    pub fn succeed(data: T) -> Self {
        Self {
            status_code: 200,
            msg: SUCCEED_MSG.to_string(),
            data: Some(data),
        }
    }

    pub fn failed(status_code: u16, msg: impl Into<String>) -> Self {
        Self {
            status_code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// One violated constraint in a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    /// An error about the body as a whole.
    pub fn body(msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
        }
    }

    /// An error about a top-level field of the body.
    pub fn field(name: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), name.to_string()],
            msg: msg.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.loc.join("."), self.msg)
    }
}

/// A request payload with field rules checked before deserialization.
pub trait RequestModel: DeserializeOwned {
    fn field_errors(body: &Value) -> Vec<FieldError>;
}

struct FieldRule {
    name: &'static str,
    required: bool,
    non_empty: bool,
}

const CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        name: "title",
        required: true,
        non_empty: true,
    },
    FieldRule {
        name: "content",
        required: true,
        non_empty: false,
    },
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule {
        name: "title",
        required: false,
        non_empty: true,
    },
    FieldRule {
        name: "content",
        required: false,
        non_empty: false,
    },
];

impl RequestModel for CreateTodoRequest {
    fn field_errors(body: &Value) -> Vec<FieldError> {
        check_fields(body, CREATE_RULES)
    }
}

impl RequestModel for UpdateTodoRequest {
    fn field_errors(body: &Value) -> Vec<FieldError> {
        check_fields(body, UPDATE_RULES)
    }
}

fn check_fields(body: &Value, rules: &[FieldRule]) -> Vec<FieldError> {
    let object = match body {
        Value::Object(object) => object,
        Value::Null => return vec![FieldError::body("Field required")],
        _ => {
            return vec![FieldError::body(
                "Input should be a valid dictionary or object to extract fields from",
            )]
        }
    };

    rules
        .iter()
        .filter_map(|rule| match object.get(rule.name) {
            None => rule
                .required
                .then(|| FieldError::field(rule.name, "Field required")),
            Some(Value::String(s)) if rule.non_empty && s.is_empty() => Some(FieldError::field(
                rule.name,
                "String should have at least 1 character",
            )),
            Some(Value::String(_)) => None,
            Some(_) => Some(FieldError::field(
                rule.name,
                "Input should be a valid string",
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_to_document_has_both_fields() {
        let input = CreateTodoRequest {
            title: "Test Title".to_string(),
            content: "Test Content".to_string(),
        };
        assert_eq!(
            Value::Object(input.to_document()),
            json!({"title": "Test Title", "content": "Test Content"})
        );
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let input = UpdateTodoRequest {
            title: None,
            content: Some("Updated Content".to_string()),
        };
        let doc = input.to_document();
        assert_eq!(doc.len(), 1);
        assert!(!doc.contains_key("title"));
        assert_eq!(doc["content"], "Updated Content");
    }

    #[test]
    fn empty_update_request_produces_empty_document() {
        let input: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(input.to_document().is_empty());
    }

    #[test]
    fn update_rules_reject_explicit_null() {
        let errors = UpdateTodoRequest::field_errors(&json!({"title": null}));
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["body.title: Input should be a valid string"]);
    }

    #[test]
    fn todo_response_reads_store_document() {
        let doc = json!({"id": "67e42cbd23fd49969709329a", "title": "Test", "content": "Mocked content"});
        let todo = Todo::from_document(doc.as_object().unwrap().clone()).unwrap();
        let response = TodoResponse::from(todo);
        assert_eq!(response.id, "67e42cbd23fd49969709329a");
        assert_eq!(serde_json::to_value(&response).unwrap(), doc);
    }

    #[test]
    fn malformed_document_is_a_store_error() {
        let doc = json!({"id": "1", "title": "Missing content"});
        let err = Todo::from_document(doc.as_object().unwrap().clone()).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn envelope_serializes_absent_data_as_null() {
        let envelope: Envelope<TodoResponse> = Envelope::failed(404, "Todo not found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, json!({"status_code": 404, "msg": "Todo not found", "data": null}));
    }

    #[test]
    fn create_rules_report_missing_title() {
        let errors = CreateTodoRequest::field_errors(&json!({"content": "Mocked content"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "body.title: Field required");
    }

    #[test]
    fn create_rules_report_every_violation() {
        let errors = CreateTodoRequest::field_errors(&json!({"title": "", "content": 3}));
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "body.title: String should have at least 1 character",
                "body.content: Input should be a valid string",
            ]
        );
    }

    #[test]
    fn update_rules_accept_empty_object_but_not_nulls() {
        assert!(UpdateTodoRequest::field_errors(&json!({})).is_empty());
        assert_eq!(
            UpdateTodoRequest::field_errors(&json!({"title": null, "content": null})).len(),
            2
        );
    }

    #[test]
    fn rules_reject_missing_and_non_object_bodies() {
        let missing = UpdateTodoRequest::field_errors(&Value::Null);
        assert_eq!(missing[0].to_string(), "body: Field required");

        let array = CreateTodoRequest::field_errors(&json!([1, 2]));
        assert_eq!(
            array[0].to_string(),
            "body: Input should be a valid dictionary or object to extract fields from"
        );
    }
}
