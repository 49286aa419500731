// ============================================================================
// DERMODEL API - openFDA ingredient proxy
// ============================================================================

// - Ingredient lookups forwarded to the openFDA label API
// - API key injected server side, never exposed to browsers
// - Upstream failures mapped to stable JSON errors
// - CORS allow-list for the web frontends
// - Health and connectivity checks

pub mod app;
pub mod config;
pub mod errors;
pub mod fda;
pub mod routes;
pub mod states;

pub use app::create_app;
pub use config::Config;
pub use states::AppState;
