//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its URL.
///
/// # Endpoint
///
/// `GET /r/{id}`
///
/// Lookup goes through the in-process resolution cache, then the shared cache,
/// then storage (see [`crate::application::services::ResolutionService`]).
///
/// # Errors
///
/// Returns 404 Not Found if no mapping has this identifier.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.resolution_service.resolve(&id).await?;

    Ok(Redirect::temporary(&url))
}
