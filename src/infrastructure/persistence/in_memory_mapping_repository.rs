//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{InsertOutcome, Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Process-local mapping store using `DashMap`.
///
/// `DashMap` shards its locks, so concurrent inserts of different identifiers
/// rarely contend. Insert-if-absent goes through the entry API, which holds the
/// shard lock across the check and the write; two racing inserts of the same
/// identifier therefore see exactly one winner.
///
/// Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    storage: DashMap<String, Mapping>,
}

impl InMemoryMappingRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError> {
        match self.storage.entry(new_mapping.id.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Conflict),
            Entry::Vacant(slot) => {
                let mapping = new_mapping.into_mapping();
                slot.insert(mapping.clone());
                Ok(InsertOutcome::Inserted(mapping))
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.storage.len() as u64)
    }
}
