//! Identifier charset and the length policy derived from it.
//!
//! The identifier space at length `n` holds `CHARSET_SIZE^n` values. The policy
//! picks the shortest length at which the stored mappings occupy no more than
//! `max_fill_ratio` of that space, so identifiers stay short while the chance
//! of a random collision stays bounded.

/// Characters eligible for use in a short identifier.
///
/// Letters, digits, `-` and `.`; all four groups are unreserved in RFC 3986 and
/// need no escaping inside a path segment.
pub const SHORT_ID_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-.";

/// Number of characters in [`SHORT_ID_CHARSET`].
pub const CHARSET_SIZE: usize = SHORT_ID_CHARSET.len();

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_FILL_RATIO: f64 = 0.3;

/// Number of distinct identifiers of the given length, saturating at `u128::MAX`.
pub fn capacity(length: usize) -> u128 {
    let exponent = u32::try_from(length).unwrap_or(u32::MAX);
    (CHARSET_SIZE as u128).saturating_pow(exponent)
}

/// Computes the identifier length for the current number of mappings.
///
/// Starts at `min_length` and grows one character at a time while
/// `capacity(length) * max_fill_ratio < current_count`.
///
/// `max_fill_ratio` must lie in `(0, 1]` (enforced by configuration
/// validation); with that, the loop always terminates because capacity
/// saturates far above any `u64` count.
///
/// # Examples
///
/// ```
/// use link_allocator::domain::length_policy::compute_length;
///
/// assert_eq!(compute_length(0, 4, 0.3), 4);
/// // 64^3 * 0.3 = 78643.2
/// assert_eq!(compute_length(78_643, 3, 0.3), 3);
/// assert_eq!(compute_length(78_644, 3, 0.3), 4);
/// ```
pub fn compute_length(current_count: u64, min_length: usize, max_fill_ratio: f64) -> usize {
    let count = current_count as f64;
    let mut length = min_length;
    let mut combinations = capacity(length);

    while (combinations as f64) * max_fill_ratio < count {
        length += 1;
        combinations = capacity(length);
    }

    length
}

/// Returns true if `max_fill_ratio` is a usable policy input.
pub fn is_valid_fill_ratio(max_fill_ratio: f64) -> bool {
    max_fill_ratio.is_finite() && max_fill_ratio > 0.0 && max_fill_ratio <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_charset_has_64_unique_url_safe_chars() {
        assert_eq!(CHARSET_SIZE, 64);

        let unique: HashSet<_> = SHORT_ID_CHARSET.iter().collect();
        assert_eq!(unique.len(), CHARSET_SIZE);

        assert!(
            SHORT_ID_CHARSET
                .iter()
                .all(|c| c.is_ascii_alphanumeric() || *c == b'-' || *c == b'.')
        );
    }

    #[test]
    fn test_zero_count_returns_min_length() {
        for min_length in 1..8 {
            assert_eq!(compute_length(0, min_length, 0.3), min_length);
        }
    }

    #[test]
    fn test_length_grows_at_fill_boundary() {
        // 64^1 * 0.5 = 32
        assert_eq!(compute_length(32, 1, 0.5), 1);
        assert_eq!(compute_length(33, 1, 0.5), 2);

        // 64^2 * 0.5 = 2048
        assert_eq!(compute_length(2048, 1, 0.5), 2);
        assert_eq!(compute_length(2049, 1, 0.5), 3);
    }

    #[test]
    fn test_min_length_is_respected_when_already_large_enough() {
        assert_eq!(compute_length(1_000_000, 8, 0.3), 8);
    }

    #[test]
    fn test_is_deterministic() {
        for count in [0, 1, 500, 78_644, 10_000_000] {
            assert_eq!(compute_length(count, 3, 0.3), compute_length(count, 3, 0.3));
        }
    }

    #[test]
    fn test_capacity_covers_count() {
        let ratio = 0.3;
        for count in [0u64, 1, 19, 20, 1_229, 78_643, 78_644, 5_000_000, u64::MAX / 2] {
            let length = compute_length(count, 3, ratio);

            assert!(length >= 3);
            assert!(capacity(length) as f64 * ratio >= count as f64);
        }
    }

    #[test]
    fn test_returned_length_is_smallest() {
        let ratio = 0.3;
        for count in [79_000u64, 5_033_165, 5_033_166, 400_000_000] {
            let length = compute_length(count, 1, ratio);

            assert!(length > 1);
            assert!((capacity(length - 1) as f64) * ratio < count as f64);
        }
    }

    #[test]
    fn test_terminates_for_max_count() {
        let length = compute_length(u64::MAX, 1, 1.0);
        assert!(capacity(length) as f64 >= u64::MAX as f64);
    }

    #[test]
    fn test_capacity_saturates() {
        assert_eq!(capacity(0), 1);
        assert_eq!(capacity(2), 4096);
        assert_eq!(capacity(100), u128::MAX);
    }

    #[test]
    fn test_fill_ratio_validation() {
        assert!(is_valid_fill_ratio(0.3));
        assert!(is_valid_fill_ratio(1.0));
        assert!(!is_valid_fill_ratio(0.0));
        assert!(!is_valid_fill_ratio(-0.1));
        assert!(!is_valid_fill_ratio(1.5));
        assert!(!is_valid_fill_ratio(f64::NAN));
    }
}
