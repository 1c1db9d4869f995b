//! API route definitions.

use axum::Router;
use axum::routing::{get, post};

use crate::api::handlers::{health_handler, index_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

/// Public routes of the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/url/shorten", post(shorten_handler))
        .route("/r/{id}", get(redirect_handler))
}
