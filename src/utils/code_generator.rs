//! Candidate identifier generation and validation.
//!
//! Candidates are drawn uniformly from [`SHORT_ID_CHARSET`] using the
//! thread-local generator. They are not meant to be unguessable, and the
//! generator makes no uniqueness promise: the store's primary key decides.

use crate::domain::length_policy::SHORT_ID_CHARSET;
use rand::Rng;

/// Generates a random identifier of exactly `length` characters.
///
/// # Examples
///
/// ```
/// use link_allocator::utils::code_generator::{generate_code, is_valid_code};
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..SHORT_ID_CHARSET.len());
            SHORT_ID_CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` could have been produced by [`generate_code`].
///
/// Used to reject obviously unknown identifiers before touching any cache or
/// the database.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| SHORT_ID_CHARSET.contains(&b))
}

/// Returns true for `.` and `..`, which clients collapse as path dot segments.
///
/// Such identifiers can be stored but never reach the redirect route, so they
/// must not be handed out.
pub fn is_dot_segment(code: &str) -> bool {
    code == "." || code == ".."
}
