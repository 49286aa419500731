use crate::fda::UpstreamError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    InvalidApiKey,
    NoIngredients,
    FetchFailed(String),
    ConnectionFailed(String),
    RouteNotFound,
    Internal(String),
}

/// Ingredient lookups classify upstream failures by status code.
impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized => ApiError::InvalidApiKey,
            UpstreamError::NotFound => ApiError::NoIngredients,
            other => ApiError::FetchFailed(other.to_string()),
        }
    }
}

/// Every variant renders as a JSON body with an `error` field. Internal
/// detail is logged and never returned to the caller.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid FDA API key"),
            ApiError::NoIngredients => (StatusCode::NOT_FOUND, "No ingredients found"),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "Not Found"),
            ApiError::FetchFailed(details) => {
                return with_details("Failed to fetch ingredients", details);
            }
            ApiError::ConnectionFailed(details) => {
                return with_details("FDA API connection failed", details);
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!")
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}

fn with_details(message: &str, details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
          "error": message,
          "details": details
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_401_becomes_invalid_key() {
        let (status, body) = render(UpstreamError::Unauthorized.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid FDA API key"}));
    }

    #[tokio::test]
    async fn upstream_404_becomes_no_ingredients() {
        let (status, body) = render(UpstreamError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "No ingredients found"}));
    }

    #[tokio::test]
    async fn other_upstream_failures_carry_details() {
        let err = UpstreamError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": "Failed to fetch ingredients",
                "details": "Request failed with status code 502"
            })
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_detail() {
        let (status, body) = render(ApiError::Internal("db exploded at 0xdead".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Something broke!"}));
    }
}
