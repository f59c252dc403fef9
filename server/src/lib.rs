//! HTTP surface of the todo service.
//!
//! `app` wires the `/api/v1/todo` routes to a `TodoService`; `run` serves
//! them until the given shutdown future resolves.

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod routes;
pub mod telemetry;

use std::future::Future;

use axum::Router;
use todo_core::TodoService;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::AppError;

pub fn app(service: TodoService) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn run<F>(listener: TcpListener, service: TodoService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown)
        .await
}
