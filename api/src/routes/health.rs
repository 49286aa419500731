use crate::AppState;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fixed-body endpoints: `(path, key, value)` renders `{"key": "value"}`.
pub const STATIC_ENDPOINTS: &[(&str, &str, &str)] = &[
    ("/api/health", "status", "Backend is healthy"),
    ("/test", "message", "Test endpoint working"),
];

#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// GET /
/// Response: 200 OK with `{"status": "healthy", "environment": ...}`
pub async fn root(State(state): State<AppState>) -> Json<RootStatus> {
    Json(RootStatus {
        status: "healthy",
        environment: state.environment.clone(),
    })
}

/// Routes for every entry in [`STATIC_ENDPOINTS`]. None of them touch the upstream.
pub fn static_routes() -> Router<AppState> {
    STATIC_ENDPOINTS
        .iter()
        .fold(Router::new(), |router, &(path, key, value)| {
            router.route(path, get(move || async move { Json(literal(key, value)) }))
        })
}

fn literal(key: &str, value: &str) -> Value {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::from(value));
    Value::Object(body)
}
