//! Client for the openFDA drug label API.
//!
//! Every call is a single GET against `/drug/label.json` with the API key in
//! the query string. Responses are classified into [`UpstreamError`] so the
//! route handlers can switch on a closed set of outcomes.

use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

/// Search expression sent with every ingredient lookup.
pub const INGREDIENT_SEARCH: &str = "active_ingredient:\"skin\"";
pub const INGREDIENT_LIMIT: u32 = 5;

const INVALID_FORMAT: &str = "Invalid response format from FDA API";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed with status code 401")]
    Unauthorized,
    #[error("Request failed with status code 404")]
    NotFound,
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },
    #[error("{}", error_chain(.0))]
    Network(reqwest::Error),
    #[error("{0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// HTTP status reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Unauthorized => Some(401),
            UpstreamError::NotFound => Some(404),
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Network(e) => e.status().map(|s| s.as_u16()),
            UpstreamError::InvalidResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        UpstreamError::Network(e.without_url())
    }
}

/// Joins an error and all of its sources with `": "`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Clone)]
pub struct FdaClient {
    http: Client,
    api_key: String,
    label_url: Url,
}

impl fmt::Debug for FdaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FdaClient")
            .field("api_key", &"[REDACTED]")
            .field("label_url", &self.label_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FdaClient {
    pub fn new(http: Client, api_key: impl Into<String>, label_url: Url) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            label_url,
        }
    }

    /// Builds the label query URL: `api_key`, optional `search`, then `limit`.
    pub fn label_url(&self, search: Option<&str>, limit: u32) -> Url {
        let mut url = self.label_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("api_key", &self.api_key);
            if let Some(search) = search {
                query.append_pair("search", search);
            }
            query.append_pair("limit", &limit.to_string());
        }
        url
    }

    /// Fetches the fixed ingredient query and returns the upstream body untouched.
    ///
    /// The body must be JSON carrying a truthy `results` field; anything
    /// else is reported as [`UpstreamError::InvalidResponse`].
    pub async fn fetch_ingredients(&self) -> Result<Bytes, UpstreamError> {
        let url = self.label_url(Some(INGREDIENT_SEARCH), INGREDIENT_LIMIT);
        info!(url = %redacted(&url), "FDA API URL");

        let body = self.get(url).await?;

        if !has_results(&body) {
            error!(body = %String::from_utf8_lossy(&body), "Invalid FDA API response");
            return Err(UpstreamError::InvalidResponse(INVALID_FORMAT.to_string()));
        }

        Ok(body)
    }

    /// Issues a minimal query to confirm the key is accepted.
    pub async fn verify_key(&self) -> Result<(), UpstreamError> {
        let url = self.label_url(None, 1);
        info!(url = %redacted(&url), "Verifying FDA API key");

        self.get(url).await.map(|_| ())
    }

    async fn get(&self, url: Url) -> Result<Bytes, UpstreamError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "FDA API returned an error status");

            return Err(match status {
                StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
                StatusCode::NOT_FOUND => UpstreamError::NotFound,
                _ => UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        Ok(response.bytes().await?)
    }
}

/// `results` must be present and truthy: `null`, `false`, `0` and `""` are
/// rejected, while empty arrays and objects still count.
fn has_results(body: &[u8]) -> bool {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|doc| doc.get("results").map(is_truthy))
        .unwrap_or(false)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Copy of `url` with the `api_key` value masked, for logging.
pub fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "api_key" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}
