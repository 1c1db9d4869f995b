mod common;

use axum::{Router, routing::post};
use link_allocator::api::handlers::shorten_handler;
use link_allocator::application::services::AllocationPolicy;
use link_allocator::domain::repositories::MappingRepository;
use link_allocator::infrastructure::persistence::InMemoryMappingRepository;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn app(state: link_allocator::AppState) -> Router {
    Router::new()
        .route("/url/shorten", post(shorten_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_shorten_success() {
    let (state, repository) = common::create_test_state();
    let server = common::test_server(app(state));

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    let id = common::id_from_short_url(short_url);

    assert_eq!(id.len(), 3);
    let stored = repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.url, "https://example.com");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_ids() {
    let (state, repository) = common::create_test_state();
    let server = common::test_server(app(state));

    let mut ids = HashSet::new();
    for _ in 0..2 {
        let response = server
            .post("/url/shorten")
            .json(&json!({ "url": "https://example.com/same" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        ids.insert(common::id_from_short_url(json["short_url"].as_str().unwrap()));
    }

    assert_eq!(ids.len(), 2);
    assert_eq!(repository.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_respects_min_length() {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = common::create_test_state_with(
        repository,
        AllocationPolicy {
            min_length: 6,
            ..AllocationPolicy::default()
        },
    );
    let server = common::test_server(app(state));

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(
        common::id_from_short_url(json["short_url"].as_str().unwrap()).len(),
        6
    );
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, repository) = common::create_test_state();
    let server = common::test_server(app(state));

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_exhausted_returns_503() {
    // A single-symbol space that is already taken: every candidate collides.
    let repository = Arc::new(InMemoryMappingRepository::new());
    for symbol in link_allocator::domain::length_policy::SHORT_ID_CHARSET {
        let id = (*symbol as char).to_string();
        common::create_test_mapping(repository.as_ref(), &id, "https://taken.com").await;
    }

    let state = common::create_test_state_with(
        repository.clone(),
        AllocationPolicy {
            min_length: 1,
            max_fill_ratio: 1.0,
            max_retries: 3,
        },
    );
    let server = common::test_server(app(state));

    let response = server
        .post("/url/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_service_unavailable();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unavailable");
    assert_eq!(
        json["error"]["message"],
        "Failed to generate short url, try again later"
    );
    assert_eq!(json["error"]["details"]["attempts"], 4);
    assert_eq!(repository.count().await.unwrap(), 64);
}
