//! `/api/v1/todo` handlers.
//!
//! Handlers only call the service and wrap the result; error mapping lives
//! in `AppError`.

use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;
use todo_core::client::TODO_PATH;
use todo_core::{CreateTodoRequest, TodoResponse, TodoService, UpdateTodoRequest};

use crate::envelope;
use crate::error::AppError;
use crate::extract::{ValidJson, ValidPath};

pub fn router() -> Router<TodoService> {
    Router::new()
        .route(TODO_PATH, get(get_todos).post(create_todo))
        .route(
            &format!("{TODO_PATH}/{{id}}"),
            put(update_todo).delete(delete_todo),
        )
}

async fn get_todos(State(service): State<TodoService>) -> Result<Response, AppError> {
    let todos = service.get_todos().await?;
    let data: Vec<TodoResponse> = todos.into_iter().map(TodoResponse::from).collect();
    Ok(envelope::succeed(data))
}

async fn create_todo(
    State(service): State<TodoService>,
    ValidJson(input): ValidJson<CreateTodoRequest>,
) -> Result<Response, AppError> {
    let todo = service.create_todo(input).await?;
    Ok(envelope::succeed(TodoResponse::from(todo)))
}

async fn update_todo(
    State(service): State<TodoService>,
    ValidPath(id): ValidPath<String>,
    ValidJson(input): ValidJson<UpdateTodoRequest>,
) -> Result<Response, AppError> {
    let todo = service.update_todo(&id, input).await?;
    Ok(envelope::succeed(TodoResponse::from(todo)))
}

async fn delete_todo(
    State(service): State<TodoService>,
    ValidPath(id): ValidPath<String>,
) -> Result<Response, AppError> {
    let todo = service.delete_todo(&id).await?;
    Ok(envelope::succeed(TodoResponse::from(todo)))
}
