//! Handler for the root endpoint.

/// Liveness banner.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> &'static str {
    "Your URL Shortener is running!"
}
