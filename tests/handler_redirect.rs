mod common;

use axum::{Router, routing::get};
use link_allocator::api::handlers::redirect_handler;

fn app(state: link_allocator::AppState) -> Router {
    Router::new()
        .route("/r/{id}", get(redirect_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_redirect_success() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(repository.as_ref(), "abc", "https://example.com/target").await;

    let server = common::test_server(app(state));

    let response = server.get("/r/abc").await;

    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_redirect_repeated_is_stable() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(repository.as_ref(), "Zz-9.", "https://example.com").await;

    let server = common::test_server(app(state));

    for _ in 0..3 {
        let response = server.get("/r/Zz-9.").await;
        response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            "https://example.com"
        );
    }
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repository) = common::create_test_state();
    let server = common::test_server(app(state));

    let response = server.get("/r/doesNotExist").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Short url not found");
}

#[tokio::test]
async fn test_redirect_foreign_characters_not_found() {
    let (state, _repository) = common::create_test_state();
    let server = common::test_server(app(state));

    let response = server.get("/r/a_b").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let (state, repository) = common::create_test_state();
    common::create_test_mapping(repository.as_ref(), "abc", "https://example.com").await;

    let server = common::test_server(app(state));

    server.get("/r/ABC").await.assert_status_not_found();
}
