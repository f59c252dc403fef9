//! SQLite-backed record store.
//!
//! Documents map onto a single `todo` table with one text column per field.
//! Native order is `rowid` order, i.e. insertion order.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::error::{Result, TodoError};
use crate::store::{new_id, TodoStore};
use crate::types::{Document, Todo};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id      TEXT PRIMARY KEY NOT NULL,
    title   TEXT NOT NULL,
    content TEXT NOT NULL
)
"#;

const UPDATABLE: [&str; 2] = ["title", "content"];

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url` and create the `todo` table if missing.
    ///
    /// Accepts `sqlite::memory:`, `sqlite://path`, `sqlite:path` or a bare
    /// file path. File databases are created on first use.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // The database lives only as long as a connection to it does.
            pool_options = pool_options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;
        sqlx::query(SCHEMA).execute(&pool).await?;

        tracing::info!(database_url, "connected to sqlite todo store");
        Ok(Self { pool })
    }
}

/// `None` when the key is absent, `Some(None)` when it is set to `null`.
fn text_field(data: &Document, key: &str) -> Result<Option<Option<String>>> {
    match data.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(other) => Err(TodoError::store(format!(
            "field `{key}` must be a string, got {other}"
        ))),
    }
}

fn required_text(data: &Document, key: &str) -> Result<String> {
    text_field(data, key)?
        .flatten()
        .ok_or_else(|| TodoError::store(format!("missing field `{key}`")))
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn find_many(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, title, content FROM todo ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn find_unique(&self, id: &str) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT id, title, content FROM todo WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_todo).transpose()
    }

    async fn create(&self, data: Document) -> Result<Todo> {
        let title = required_text(&data, "title")?;
        let content = required_text(&data, "content")?;

        let row = sqlx::query(
            "INSERT INTO todo (id, title, content) VALUES (?, ?, ?) RETURNING id, title, content",
        )
        .bind(new_id())
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        row_to_todo(&row)
    }

    async fn update(&self, id: &str, data: Document) -> Result<Todo> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE todo SET ");
        let mut has_updates = false;

        // A `null` is bound as SQL NULL and left for the NOT NULL constraint.
        for column in UPDATABLE {
            if let Some(value) = text_field(&data, column)? {
                if has_updates {
                    builder.push(", ");
                }
                builder.push(column).push(" = ").push_bind(value);
                has_updates = true;
            }
        }

        if !has_updates {
            return self
                .find_unique(id)
                .await?
                .ok_or_else(|| TodoError::not_found(id));
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(" RETURNING id, title, content");

        let row = builder.build().fetch_optional(&self.pool).await?;
        match row {
            Some(row) => row_to_todo(&row),
            None => Err(TodoError::not_found(id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<Todo> {
        let row = sqlx::query("DELETE FROM todo WHERE id = ? RETURNING id, title, content")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => row_to_todo(&row),
            None => Err(TodoError::not_found(id)),
        }
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("sqlite todo store closed");
    }
}
