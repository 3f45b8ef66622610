//! HTTP API server for fauna-catalog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

pub mod api_error;
mod cors;
mod extract;
mod handlers;
mod query_types;
mod response_types;


use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use fauna_storage::AnimalStore;

pub use cors::{CORS_ORIGINS_VAR, cors_layer, cors_origins_from_env};
pub use response_types::{CreateResponse, SuccessResponse};

/// Shared application state for all HTTP handlers.
///
/// Only the store handle is shared; every request is otherwise independent.
pub struct AppState {
    pub store: Arc<dyn AnimalStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn AnimalStore>) -> Self {
        Self { store }
    }
}

/// Builds the router with the CORS policy for `origins`.
pub fn create_router(state: Arc<AppState>, origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/animales/{pais}", get(handlers::animals::list_by_country))
        .route("/add-animal", post(handlers::animals::create_animal))
        .route(
            "/animal/{id}",
            get(handlers::animals::get_animal)
                .delete(handlers::animals::delete_animal)
                .put(handlers::animals::update_animal),
        )
        .layer(cors_layer(origins))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
