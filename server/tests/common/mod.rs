#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tower::ServiceExt;

use server::{
    config::AppConfig,
    http::{build_router, AppState},
    store::EmployeeStore,
};

/// Fresh store over an in-memory sqlite database, schema applied.
///
/// A single pooled connection keeps the pool pinned to one in-memory
/// database for the lifetime of the test.
pub async fn test_store() -> EmployeeStore {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.unwrap();
    let store = EmployeeStore::new(db);
    store.migrate().await.unwrap();
    store
}

pub async fn test_router() -> Router {
    let store = test_store().await;
    let config = Arc::new(AppConfig::default());
    build_router(AppState { store, config })
}

pub async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
