//! Router assembly for the roster server.
//!
//! [`build_app_router`] is called by the binary and by the integration
//! tests, so both run behind identical layers.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use roster_core::upload::PUBLIC_PREFIX;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Routes:
///
/// ```text
/// GET  /  /health            liveness and store check
/// /api/employees[/{id}]      employee CRUD, body capped at MAX_UPLOAD_BYTES
/// GET  /uploads/<file>       stored attachments
/// ```
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let employees = routes::api_routes().layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", employees)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.uploads.dir()));

    with_middleware(router, config).with_state(state)
}

/// Wrap every route. Listed innermost first, so CORS sees the request
/// before anything else and a panic is turned into a 500 closest to the
/// handler.
fn with_middleware(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// CORS for the configured front-end origins.
///
/// # Panics
///
/// On an origin that is not a valid header value. Only called at start-up.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
