//! No-op shared cache.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A shared cache that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup; resolution then
/// relies on the in-process cache and the repository alone.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (shared cache disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _id: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _id: &str, _url: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
