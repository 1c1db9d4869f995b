mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use link_allocator::application::services::AllocationPolicy;
use link_allocator::infrastructure::persistence::InMemoryMappingRepository;
use link_allocator::routes::app_router;
use std::sync::Arc;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_shorten_then_follow_through_router() {
    let (state, _repository) = common::create_test_state();
    let app = app_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::post("/url/shorten")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"https://example.com/page"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let id = common::id_from_short_url(json["short_url"].as_str().unwrap());

    let response = app
        .oneshot(Request::get(format!("/r/{id}")).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(repository.as_ref(), "abc", "https://example.com").await;

    let response = app_router(state)
        .oneshot(Request::get("/r/abc/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_unknown_id_through_router() {
    let (state, _repository) = common::create_test_state();

    let response = app_router(state)
        .oneshot(Request::get("/r/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Short url not found");
}

#[tokio::test]
async fn test_every_single_character_id_resolves_through_router() {
    // 60 of 63 usable single-character ids; `.` must never be handed out.
    const N: usize = 60;

    let repository = Arc::new(InMemoryMappingRepository::new());
    let state = common::create_test_state_with(
        repository,
        AllocationPolicy {
            min_length: 1,
            max_fill_ratio: 1.0,
            max_retries: 10_000,
        },
    );
    let app = app_router(state);

    for i in 0..N {
        let url = format!("https://example.com/{i}");
        let response = app
            .clone()
            .oneshot(
                Request::post("/url/shorten")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(r#"{{"url":"{url}"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let id = common::id_from_short_url(json["short_url"].as_str().unwrap());
        assert_ne!(id, ".");

        let response = app
            .clone()
            .oneshot(Request::get(format!("/r/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "id {id}");
        assert_eq!(response.headers()[header::LOCATION], url.as_str());
    }
}
