use crate::{config::Config, fda::FdaClient};

// ============================================================================
// APPLICATION STATE - Shared, read-only data across all requests
// ============================================================================
/// Cloned into every handler. `reqwest::Client` is reference counted
/// internally, so clones share one connection pool and nothing here is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub fda: FdaClient,
    pub environment: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            fda: FdaClient::new(http, config.api_key.clone(), config.fda_label_url.clone()),
            environment: config.environment.clone(),
        })
    }
}
