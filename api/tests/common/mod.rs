//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{Request, Response},
};
use dermodel_api::{Config, create_app};
use serde_json::Value;
use std::collections::HashMap;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-fda-key";

/// Builds the app with the upstream pointed at `base_url`.
pub fn app_with_upstream(base_url: &str) -> Router {
    app_with_vars(&[("FDA_API_BASE_URL", base_url)])
}

/// Builds the app from the given variables plus a test API key.
pub fn app_with_vars(vars: &[(&str, &str)]) -> Router {
    let mut vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.entry("FDA_API_KEY".to_string())
        .or_insert_with(|| TEST_API_KEY.to_string());

    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    create_app(&config).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
