#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jotter_api::config::{DataBackend, ServerConfig};
use jotter_api::router::build_app_router;
use jotter_api::state::AppState;
use jotter_db::memory::MemoryDataClient;
use jotter_db::models::folder::{Folder, NewFolder};
use jotter_db::models::note::{NewNote, Note};
use jotter_db::DataClient;

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        view_cache_ttl_secs: 60,
        backend: DataBackend::Memory,
    }
}

/// Build the full application router over `client`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the request ID,
/// timeout, tracing and panic layers are all exercised.
pub fn build_test_app(client: Arc<MemoryDataClient>) -> Router {
    let config = test_config();
    let state = AppState::new(client, config.clone());
    build_app_router(state, &config)
}

/// A fresh store and an app wired to it.
pub fn setup() -> (Router, Arc<MemoryDataClient>) {
    let client = Arc::new(MemoryDataClient::new());
    (build_test_app(Arc::clone(&client)), client)
}

pub async fn seed_note(client: &MemoryDataClient, title: &str, content: &str) -> Note {
    client
        .notes()
        .insert(NewNote {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            folder_id: None,
        })
        .await
        .unwrap()
}

pub async fn seed_folder(client: &MemoryDataClient, name: &str) -> Folder {
    client
        .folders()
        .insert(NewFolder {
            name: name.to_string(),
        })
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an url-encoded form body, the way the browser submits the pages' forms.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
