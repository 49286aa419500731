use crate::{AppState, errors::ApiError};
use axum::{Json, extract::State};
use tracing::{error, info};

/// GET /api/test-fda
/// Response: 200 OK if the upstream accepts our key, 500 otherwise
pub async fn test_fda(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.fda.verify_key().await.map_err(|e| {
        error!(error = %e, status = ?e.status(), "FDA API connection check failed");
        ApiError::ConnectionFailed(e.to_string())
    })?;

    info!("FDA API connection verified");

    Ok(Json(serde_json::json!({
      "status": "FDA API connection successful"
    })))
}
