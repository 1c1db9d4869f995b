//! Identifier allocation service.

use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, Mapping, NewMapping};
use crate::domain::length_policy::{DEFAULT_MAX_FILL_RATIO, DEFAULT_MIN_LENGTH, compute_length};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{DerivedKey, DerivedValueCache};
use crate::utils::code_generator::{generate_code, is_dot_segment};
use tracing::{debug, info, warn};

/// Default number of retries after the first collided attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Inputs of the identifier length policy and the retry budget.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPolicy {
    pub min_length: usize,
    pub max_fill_ratio: f64,
    pub max_retries: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_fill_ratio: DEFAULT_MAX_FILL_RATIO,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Result of the bounded allocation loop.
#[derive(Debug)]
enum Allocation {
    Allocated(Mapping),
    Exhausted { attempts: u32 },
}

/// Service allocating unique short identifiers.
///
/// Each attempt draws a random candidate of the current policy length and
/// hands it to [`MappingRepository::insert_if_absent`]. The store is the only
/// judge of uniqueness; a conflict just means another draw. No lock is held
/// across attempts, and every attempt commits or rolls back on its own.
pub struct AllocationService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<DerivedValueCache>,
    policy: AllocationPolicy,
}

impl<R: MappingRepository + ?Sized> AllocationService<R> {
    /// Creates a new allocation service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<DerivedValueCache>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    /// Returns the number of stored mappings, served from the time-bounded
    /// cache region when possible.
    ///
    /// # Errors
    ///
    /// Propagates repository errors on a cache miss.
    pub async fn mapping_count(&self) -> Result<u64, AppError> {
        let key = DerivedKey::MappingCount;
        if let Some(count) = self.cache.get_derived(&key).await {
            return Ok(count);
        }

        let count = self.repository.count().await?;
        self.cache.put_derived(key, count).await;
        Ok(count)
    }

    /// Returns the identifier length for the current mapping count.
    ///
    /// Cached under the policy inputs; on a miss the count is fetched (itself
    /// through the cache) and the length recomputed.
    ///
    /// # Errors
    ///
    /// Propagates repository errors from the count lookup.
    pub async fn identifier_length(&self) -> Result<usize, AppError> {
        let key =
            DerivedKey::identifier_length(self.policy.min_length, self.policy.max_fill_ratio);
        if let Some(length) = self.cache.get_derived(&key).await {
            return Ok(length as usize);
        }

        let count = self.mapping_count().await?;
        let length = compute_length(count, self.policy.min_length, self.policy.max_fill_ratio);
        self.cache.put_derived(key, length as u64).await;
        Ok(length)
    }

    /// Allocates an identifier for `url` using the configured retry budget.
    ///
    /// # Errors
    ///
    /// See [`Self::allocate_with_retries`].
    pub async fn allocate(&self, url: String) -> Result<Mapping, AppError> {
        self.allocate_with_retries(url, self.policy.max_retries).await
    }

    /// Allocates an identifier for `url`, retrying up to `max_retries` times
    /// after identifier collisions.
    ///
    /// At most `max_retries + 1` candidates are tried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] (see [`AppError::allocation_exhausted`])
    /// if every candidate collided; nothing is written in that case.
    /// Any other repository error is returned as soon as it happens, without retry.
    pub async fn allocate_with_retries(
        &self,
        url: String,
        max_retries: u32,
    ) -> Result<Mapping, AppError> {
        match self.run_attempts(url, max_retries).await? {
            Allocation::Allocated(mapping) => {
                metrics::counter!("allocations_total").increment(1);
                info!(id = %mapping.id, "Allocated short identifier");
                Ok(mapping)
            }
            Allocation::Exhausted { attempts } => {
                metrics::counter!("allocation_exhausted_total").increment(1);
                warn!(attempts, "Identifier allocation exhausted its retry budget");
                Err(AppError::allocation_exhausted(attempts))
            }
        }
    }

    async fn run_attempts(&self, url: String, max_retries: u32) -> Result<Allocation, AppError> {
        let length = self.identifier_length().await?;
        let mut retries = 0;

        loop {
            let code = generate_code(length);
            // Dot segments never reach `/r/{id}`; redraw without spending a retry.
            if is_dot_segment(&code) {
                continue;
            }

            let candidate = NewMapping::now(code, url.clone());
            let id = candidate.id.clone();

            match self.repository.insert_if_absent(candidate).await? {
                InsertOutcome::Inserted(mapping) => return Ok(Allocation::Allocated(mapping)),
                InsertOutcome::Conflict if retries >= max_retries => {
                    return Ok(Allocation::Exhausted {
                        attempts: retries + 1,
                    });
                }
                InsertOutcome::Conflict => {
                    metrics::counter!("allocation_collisions_total").increment(1);
                    retries += 1;
                    debug!(%id, retries, "Identifier collision, drawing a new candidate");
                }
            }
        }
    }
}
