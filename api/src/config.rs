use axum::http::HeaderValue;
use std::fmt;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_FDA_BASE_URL: &str = "https://api.fda.gov";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "https://dermodel.app",
    "https://www.dermodel.app",
    "https://dermodel.netlify.app",
];

const LABEL_PATH: &str = "drug/label.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FDA_API_KEY is not set in environment variables")]
    MissingApiKey,
    #[error("PORT must be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("FDA_API_BASE_URL is not a usable base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("CORS_ALLOWED_ORIGINS contains an invalid origin: {0:?}")]
    InvalidOrigin(String),
}

/// Settings resolved once at startup and handed to the router.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    /// Deployment label echoed by `GET /` (`APP_ENV`, else `NODE_ENV`).
    pub environment: Option<String>,
    /// Full upstream endpoint, e.g. `https://api.fda.gov/drug/label.json`.
    pub fda_label_url: Url,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FDA_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        // Older deployments set NODE_ENV instead.
        let environment = ["APP_ENV", "NODE_ENV"]
            .into_iter()
            .find_map(|key| lookup(key).filter(|env| !env.is_empty()));

        let base = lookup("FDA_API_BASE_URL").unwrap_or_else(|| DEFAULT_FDA_BASE_URL.to_string());
        let fda_label_url = label_url_from_base(&base)?;

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(list) => parse_origins(list.split(','))?,
            None => parse_origins(DEFAULT_ALLOWED_ORIGINS)?,
        };

        Ok(Self {
            api_key,
            port,
            environment,
            fda_label_url,
            allowed_origins,
        })
    }
}

// Keeps the key out of log lines that print the config.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("fda_label_url", &self.fda_label_url.as_str())
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

fn label_url_from_base(base: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl(format!("{base}: {reason}"));

    // A trailing slash makes `join` append instead of replacing the last segment.
    let normalized = format!("{}/", base.trim().trim_end_matches('/'));
    let base_url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".into()));
    }

    base_url
        .join(LABEL_PATH)
        .map_err(|e| invalid(e.to_string()))
}

fn parse_origins<'a, I>(origins: I) -> Result<Vec<HeaderValue>, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    origins
        .into_iter()
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            // Wildcards are not allowed alongside an explicit list.
            if origin == "*" {
                return Err(ConfigError::InvalidOrigin(origin.to_string()));
            }
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect()
}
