//! Business rules on top of a `TodoStore`.
//!
//! # Design
//! `TodoService` is stateless apart from the injected store handle, so it is
//! cheap to clone into every request. Update and delete look the record up
//! first and fail with `NotFound` before touching the store; whatever the
//! store then returns is handed back as-is. Store failures pass through
//! unchanged.

use std::sync::Arc;

use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use crate::types::{CreateTodoRequest, Todo, UpdateTodoRequest};

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    unique_titles: bool,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService")
            .field("unique_titles", &self.unique_titles)
            .finish_non_exhaustive()
    }
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            unique_titles: false,
        }
    }

    /// Reject `create_todo`, and an `update_todo` that sets a title, with
    /// `AlreadyExists` when another todo already has that title.
    pub fn with_unique_titles(mut self, enabled: bool) -> Self {
        self.unique_titles = enabled;
        self
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>> {
        let todos = self.store.find_many().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    pub async fn create_todo(&self, input: CreateTodoRequest) -> Result<Todo> {
        self.ensure_title_free(&input.title, None).await?;
        let todo = self.store.create(input.to_document()).await?;
        tracing::info!(id = %todo.id, "created todo");
        Ok(todo)
    }

    pub async fn update_todo(&self, id: &str, input: UpdateTodoRequest) -> Result<Todo> {
        self.get_todo_by_id(id).await?;
        if let Some(title) = &input.title {
            self.ensure_title_free(title, Some(id)).await?;
        }
        let todo = self.store.update(id, input.to_document()).await?;
        tracing::info!(id, "updated todo");
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: &str) -> Result<Todo> {
        self.get_todo_by_id(id).await?;
        let todo = self.store.delete(id).await?;
        tracing::info!(id, "deleted todo");
        Ok(todo)
    }

    /// No-op unless unique titles are on. `owner` is the todo being renamed,
    /// which may keep its own title.
    async fn ensure_title_free(&self, title: &str, owner: Option<&str>) -> Result<()> {
        if !self.unique_titles {
            return Ok(());
        }
        let todos = self.store.find_many().await?;
        let taken = todos
            .iter()
            .any(|todo| todo.title == title && Some(todo.id.as_str()) != owner);
        if taken {
            return Err(TodoError::already_exists(title));
        }
        Ok(())
    }

    async fn get_todo_by_id(&self, id: &str) -> Result<Todo> {
        self.store
            .find_unique(id)
            .await?
            .ok_or_else(|| TodoError::not_found(id))
    }
}
