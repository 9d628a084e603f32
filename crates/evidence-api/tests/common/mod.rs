//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use evidence_content::application::provider::ContentProvider;
use evidence_content::application::source::ContentSource;
use evidence_content::domain::language::Language;
use evidence_core::clock::Clock;
use evidence_profile::profile::ProfileStore;
use evidence_profile::sqlite_store::SqliteKeyValueStore;
use evidence_test_support::fixtures::sample_document;
use evidence_test_support::{FixedClock, StaticContentSource};
use http_body_util::BodyExt;
use tower::ServiceExt;

use evidence_api::routes;
use evidence_api::state::AppState;

/// A router plus the state behind it, for assertions that bypass HTTP.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Build the full app over an in-memory SQLite profile store and the sample
/// content, loaded in Portuguese. Uses the same route structure as `main.rs`.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_source(Arc::new(StaticContentSource::new(sample_document()))).await
}

/// Build the full app with a custom content source. The startup load and the
/// content sync task run as they do in `main.rs`.
pub async fn build_test_app_with_source(source: Arc<dyn ContentSource>) -> TestApp {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::default());
    let backend = SqliteKeyValueStore::connect("sqlite::memory:")
        .await
        .unwrap();
    let profile = Arc::new(ProfileStore::new(Arc::new(backend), clock.clone()));
    let content = Arc::new(ContentProvider::new(source, Language::Pt));

    let state = AppState::new(clock, profile, content.clone());
    state.spawn_content_sync();
    content.load_language(Language::Pt).await;
    wait_for_content(&state, Language::Pt).await;

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .nest("/api/v1/profile", routes::profile::router())
        .nest("/api/v1/content", routes::content::router())
        .with_state(state.clone());

    TestApp { router, state }
}

/// Waits until the sync task has saved `language` as the preference, which
/// it does after handing the new content to the controller.
pub async fn wait_for_content(state: &AppState, language: Language) {
    for _ in 0..200 {
        if state.profile.language().await == Some(language) {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("content sync did not apply {language}");
}

/// Send a request and return the status and JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
