//! Command-line and environment configuration.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use todo_core::{MemoryStore, SqliteStore, TodoStore};

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo CRUD API over a document store")]
#[command(version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8181)]
    pub port: u16,

    /// SQLite URL or path (`sqlite::memory:`, `sqlite://todos.db`, ...).
    /// Without it todos live in process memory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log level or filter directive, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Reject new todos whose title is already taken
    #[arg(long, env = "TODO_UNIQUE_TITLES")]
    pub unique_titles: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured record store.
    pub async fn connect_store(&self) -> todo_core::Result<Arc<dyn TodoStore>> {
        match self.database_url.as_deref() {
            Some(url) => Ok(Arc::new(SqliteStore::connect(url).await?)),
            None => {
                tracing::info!("no DATABASE_URL set, keeping todos in memory");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
