use crate::{AppState, errors::ApiError};
use axum::{extract::State, http::header, response::IntoResponse};
use tracing::{error, info};

/// GET /api/ingredients
/// Response: 200 OK with the FDA label document, byte for byte
pub async fn list_ingredients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching ingredients from FDA API...");

    let body = state.fda.fetch_ingredients().await.inspect_err(|e| {
        error!(error = %e, status = ?e.status(), "FDA API Error");
    })?;

    info!("Successfully fetched ingredients");

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
