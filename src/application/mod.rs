//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! caching, and the identifier policy. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Identifier allocation with collision retry
//! - [`services::resolution_service::ResolutionService`] - Identifier to URL resolution

pub mod services;
