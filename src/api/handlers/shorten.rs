//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a short identifier for a URL.
///
/// # Endpoint
///
/// `POST /url/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "http://localhost:8000/r/aB3" }
/// ```
///
/// Shortening the same URL twice yields two distinct identifiers.
///
/// # Errors
///
/// - **400 Bad Request**: `url` is not a valid URL
/// - **503 Service Unavailable**: every candidate identifier collided
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let mapping = state.allocation_service.allocate(payload.url).await?;

    Ok(Json(ShortenResponse {
        short_url: mapping.short_url(&state.base_url),
    }))
}
