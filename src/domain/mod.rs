//! Domain layer containing business entities and logic.
//!
//! This module holds everything that does not touch I/O: the persisted entity,
//! the identifier charset with its length policy, and the persistence contract
//! the application layer programs against.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`length_policy`] - Identifier charset and length derivation
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod length_policy;
pub mod repositories;
