#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use link_allocator::application::services::AllocationPolicy;
use link_allocator::domain::entities::{InsertOutcome, Mapping, NewMapping};
use link_allocator::domain::repositories::MappingRepository;
use link_allocator::infrastructure::cache::{DerivedValueCache, NullCache};
use link_allocator::infrastructure::persistence::InMemoryMappingRepository;
use link_allocator::error::AppError;
use link_allocator::state::AppState;
use serde_json::json;

pub const BASE_URL: &str = "http://sho.rt";

pub fn create_test_state_with(
    repository: Arc<dyn MappingRepository>,
    policy: AllocationPolicy,
) -> AppState {
    AppState::new(
        repository,
        Arc::new(DerivedValueCache::default()),
        Arc::new(NullCache::new()),
        policy,
        BASE_URL,
    )
}

/// State over an empty in-memory store with the default policy.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = create_test_state_with(repository.clone(), AllocationPolicy::default());
    (state, repository)
}

pub async fn create_test_mapping(repository: &dyn MappingRepository, id: &str, url: &str) {
    repository
        .insert_if_absent(NewMapping::now(id.to_string(), url.to_string()))
        .await
        .unwrap();
}

pub fn test_server(app: Router) -> TestServer {
    TestServer::new(app).unwrap()
}

/// Extracts the identifier from a short URL produced with [`BASE_URL`].
pub fn id_from_short_url(short_url: &str) -> String {
    short_url
        .strip_prefix(&format!("{BASE_URL}/r/"))
        .unwrap_or_else(|| panic!("unexpected short url: {short_url}"))
        .to_string()
}

/// Repository whose every call fails, standing in for an unreachable database.
pub struct FailingMappingRepository;

#[async_trait]
impl MappingRepository for FailingMappingRepository {
    async fn insert_if_absent(&self, _new_mapping: NewMapping) -> Result<InsertOutcome, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Mapping>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}
