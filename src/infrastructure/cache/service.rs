//! Shared resolution cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during shared cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of resolved identifiers shared between service instances.
///
/// Consulted by the resolution path after a miss in the in-process
/// [`DerivedValueCache`](super::DerivedValueCache). Implementations must be
/// fail-open: a broken backend behaves like an empty cache, it never turns a
/// resolvable identifier into an error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the URL cached for an identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or backend error
    async fn get_url(&self, id: &str) -> CacheResult<Option<String>>;

    /// Stores the URL of an identifier.
    ///
    /// `ttl_seconds` overrides the implementation default when set.
    async fn set_url(&self, id: &str, url: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
