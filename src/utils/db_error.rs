//! Classification of `sqlx` errors.

/// Name of the primary key constraint on the `mappings` table.
pub const MAPPINGS_PKEY: &str = "mappings_pkey";

/// Returns true if the error is a unique violation on the mapping identifier.
///
/// Unique violations on any other constraint are not identifier collisions and
/// must not be retried by the allocator.
pub fn is_unique_violation_on_id(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(MAPPINGS_PKEY))
}
