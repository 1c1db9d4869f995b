//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AllocationService, ResolutionService};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, DerivedValueCache};

/// Allocation service over a type-erased repository.
pub type DynAllocationService = AllocationService<dyn MappingRepository>;

/// Resolution service over a type-erased repository.
pub type DynResolutionService = ResolutionService<dyn MappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<DynAllocationService>,
    pub resolution_service: Arc<DynResolutionService>,
    pub repository: Arc<dyn MappingRepository>,
    pub shared_cache: Arc<dyn CacheService>,
    /// Prefix of every generated short URL.
    pub base_url: String,
}

impl AppState {
    /// Wires both services around one repository and one derived-value cache.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<DerivedValueCache>,
        shared_cache: Arc<dyn CacheService>,
        policy: crate::application::services::AllocationPolicy,
        base_url: impl Into<String>,
    ) -> Self {
        let allocation_service = Arc::new(AllocationService::new(
            repository.clone(),
            cache.clone(),
            policy,
        ));
        let resolution_service = Arc::new(ResolutionService::new(
            repository.clone(),
            cache,
            shared_cache.clone(),
        ));

        Self {
            allocation_service,
            resolution_service,
            repository,
            shared_cache,
            base_url: base_url.into(),
        }
    }
}
