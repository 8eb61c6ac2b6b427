//! # lectio-server
//!
//! JSON HTTP API over a [`Journal`] backed by SQLite.
//!
//! Routes:
//! - `GET /api/entries?page=N` and `POST /api/entries`
//! - `GET`, `PUT` and `DELETE /api/entries/{id}`
//! - `GET /api/stats`
//!
//! Everything else answers 404 `{"error":"Route not found"}`.

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use lectio_core::{Database, Journal};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// State shared by every handler.
pub struct AppState {
    pub journal: Journal<Database>,
}

impl AppState {
    pub fn new(journal: Journal<Database>) -> Self {
        Self { journal }
    }
}

pub type SharedState = Arc<AppState>;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/entries",
            get(handlers::list_entries)
                .post(handlers::create_entry)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/api/entries/{id}",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/api/stats",
            get(handlers::statistics).fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP server listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
