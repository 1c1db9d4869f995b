//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Mapping`] - A short identifier bound to a destination URL
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewMapping` - For inserting new records
//! - `InsertOutcome` - Result of an insert-if-absent attempt

pub mod mapping;

pub use mapping::{InsertOutcome, Mapping, NewMapping};
