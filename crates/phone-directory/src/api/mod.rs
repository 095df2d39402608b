//! HTTP API for the directory service.

mod handlers;
mod middleware;
mod types;

pub use middleware::logging_middleware;
pub use types::*;

use crate::store::Store;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store holding every directory entry
    pub store: Arc<Store>,
}

impl AppState {
    /// Create new application state around an established store connection.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Directory operations
        .route("/", post(handlers::create_entry))
        .route(
            "/:phone",
            get(handlers::lookup_entry)
                .put(handlers::replace_entry)
                .delete(handlers::delete_entry),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
