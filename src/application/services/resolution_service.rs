//! Identifier resolution service.

use std::sync::Arc;

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, DerivedValueCache};
use crate::utils::code_generator::is_valid_code;
use serde_json::json;
use tracing::{debug, warn};

/// Service resolving short identifiers back to their URLs.
///
/// # Lookup Order
///
/// 1. Resolution region of the in-process [`DerivedValueCache`]
/// 2. Shared [`CacheService`] (Redis, or a no-op)
/// 3. [`MappingRepository::find_by_id`]
///
/// A hit at a lower level populates the levels above it. Mappings never change,
/// so cached resolutions never need invalidation. Misses are not cached.
pub struct ResolutionService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<DerivedValueCache>,
    shared_cache: Arc<dyn CacheService>,
}

impl<R: MappingRepository + ?Sized> ResolutionService<R> {
    /// Creates a new resolution service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<DerivedValueCache>,
        shared_cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            repository,
            cache,
            shared_cache,
        }
    }

    /// Resolves `id` to its destination URL.
    ///
    /// Identifiers containing characters outside the charset cannot exist and
    /// are rejected without any lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this identifier.
    /// Returns [`AppError::Internal`] on repository errors.
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        if !is_valid_code(id) {
            return Err(not_found(id));
        }

        if let Some(url) = self.cache.get_resolution(id).await {
            debug!("Cache HIT for {}", id);
            return Ok(url);
        }

        match self.shared_cache.get_url(id).await {
            Ok(Some(url)) => {
                self.cache.put_resolution(id.to_string(), url.clone()).await;
                return Ok(url);
            }
            Ok(None) => {}
            Err(e) => warn!("Shared cache error: {}", e),
        }

        debug!("Cache MISS for {}", id);

        let mapping = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        self.cache
            .put_resolution(mapping.id.clone(), mapping.url.clone())
            .await;

        if let Err(e) = self.shared_cache.set_url(&mapping.id, &mapping.url, None).await {
            warn!("Failed to populate shared cache: {}", e);
        }

        Ok(mapping.url)
    }
}

fn not_found(id: &str) -> AppError {
    AppError::not_found("Short url not found", json!({ "id": id }))
}
