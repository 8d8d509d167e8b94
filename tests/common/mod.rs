#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use urlshorts::infrastructure::persistence::RedbUrlRepository;
use urlshorts::routes::router;
use urlshorts::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_BASE_URL: &str = "http://localhost:8080";

/// A state backed by a real store in a temporary directory.
///
/// The directory is removed when the context is dropped, so keep it alive
/// for the duration of the test.
pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<RedbUrlRepository>,
    _dir: TempDir,
}

pub fn open_repository() -> (TempDir, RedbUrlRepository) {
    let dir = TempDir::new().unwrap();
    let repo = RedbUrlRepository::open(dir.path().join("urls.redb")).unwrap();
    (dir, repo)
}

pub fn create_test_state() -> TestContext {
    let (dir, repo) = open_repository();
    let repository = Arc::new(repo);

    let state = AppState::new(repository.clone(), TEST_BASE_URL, 8, TEST_API_KEY);

    TestContext {
        state,
        repository,
        _dir: dir,
    }
}

pub fn create_test_server(ctx: &TestContext) -> TestServer {
    TestServer::new(router(ctx.state.clone())).unwrap()
}

/// Creates a short URL through the API and returns the response body.
pub async fn create_short_url(
    server: &TestServer,
    original_url: &str,
    pretty_name: Option<&str>,
) -> Value {
    let mut body = json!({ "original_url": original_url });
    if let Some(name) = pretty_name {
        body["pretty_name"] = json!(name);
    }

    let response = server
        .post("/api/urls")
        .add_header("X-API-Key", TEST_API_KEY)
        .json(&body)
        .await;

    assert_eq!(response.status_code(), 201);
    response.json::<Value>()
}
