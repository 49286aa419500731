use crate::{
    AppState,
    config::Config,
    errors::ApiError,
    routes::{fda_check::test_fda, health, ingredients::list_ingredients},
};
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Builds the full service: routes, CORS, panic recovery and request tracing.
pub fn create_app(config: &Config) -> Result<Router, reqwest::Error> {
    let state = AppState::new(config)?;
    Ok(create_router(state, &config.allowed_origins))
}

pub fn create_router(state: AppState, allowed_origins: &[HeaderValue]) -> Router {
    with_middleware(api_routes(), state, allowed_origins)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/api/ingredients", get(list_ingredients))
        .route("/api/test-fda", get(test_fda))
        .merge(health::static_routes())
        .fallback(not_found)
}

/// Layer order, innermost first: panic recovery, CORS, preflight status, tracing.
fn with_middleware(
    routes: Router<AppState>,
    state: AppState,
    allowed_origins: &[HeaderValue],
) -> Router {
    routes
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(allowed_origins))
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
}

/// Origins outside the list get a normal response with no
/// `Access-Control-Allow-Origin` header.
pub fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}

// CorsLayer answers OPTIONS with 200; browsers and older clients expect 204.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }

    response
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
