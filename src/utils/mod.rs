//! Utility functions for identifier generation and database error handling.
//!
//! - [`code_generator`] - Candidate identifier generation and syntax checks
//! - [`db_error`] - Classification of database errors

pub mod code_generator;
pub mod db_error;
