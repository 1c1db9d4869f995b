//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryMappingRepository`] - Process-local storage backed by `DashMap`
//!
//! Both enforce identifier uniqueness inside the store, which is what makes
//! concurrent allocation safe.

pub mod in_memory_mapping_repository;
pub mod pg_mapping_repository;

pub use in_memory_mapping_repository::InMemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
