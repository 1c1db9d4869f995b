//! Repository trait for mapping data access.

use crate::domain::entities::{InsertOutcome, Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short identifier mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Atomically inserts the mapping unless its id is already taken.
    ///
    /// Uniqueness must be enforced by the store itself, not by a prior lookup,
    /// since several allocators may race on the same candidate. A failed
    /// attempt must leave nothing visible behind.
    ///
    /// # Returns
    ///
    /// - `Ok(InsertOutcome::Inserted(_))` on success
    /// - `Ok(InsertOutcome::Conflict)` if the id already exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on any other storage failure.
    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError>;

    /// Finds a mapping by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn find_by_id(&self, id: &str) -> Result<Option<Mapping>, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    async fn count(&self) -> Result<u64, AppError>;
}
