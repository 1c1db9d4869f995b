//! Mapping entity representing a shortened URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The persisted association between a short identifier and a destination URL.
///
/// Mappings are created exactly once and never updated, so every field is
/// fixed for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub id: String,
    pub url: String,
    pub created: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(id: String, url: String, created: DateTime<Utc>) -> Self {
        Self { id, url, created }
    }

    /// Builds the public short URL, `<base_url>/r/<id>`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/r/{}", base_url.trim_end_matches('/'), self.id)
    }
}

/// Input data for an insert-if-absent attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub id: String,
    pub url: String,
    pub created: DateTime<Utc>,
}

impl NewMapping {
    /// Stamps the candidate with the current UTC time.
    pub fn now(id: String, url: String) -> Self {
        Self {
            id,
            url,
            created: Utc::now(),
        }
    }

    pub fn into_mapping(self) -> Mapping {
        Mapping::new(self.id, self.url, self.created)
    }
}

/// Outcome of [`MappingRepository::insert_if_absent`](crate::domain::repositories::MappingRepository::insert_if_absent).
///
/// A conflict is an ordinary result rather than an error: the allocator
/// simply draws another candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Mapping),
    Conflict,
}
