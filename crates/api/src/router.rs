//! Application router shared by `main.rs` and the integration tests.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request id, set on entry and echoed on the response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Methods exposed by the news API; anything else is refused at preflight.
const ALLOWED_METHODS: [Method; 2] = [Method::GET, Method::PUT];

#[derive(Debug, thiserror::Error)]
#[error("Invalid CORS origin '{origin}'")]
pub struct InvalidOrigin {
    pub origin: String,
}

/// Build the application router: `/health` at the root, the news API under
/// `/api/v1`, wrapped in the middleware described by `config`.
///
/// Fails if a configured CORS origin is not a valid header value.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Result<Router, InvalidOrigin> {
    let routes = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes());

    Ok(with_middleware(routes, config)?.with_state(state))
}

/// Layers are listed innermost first: a panic in a handler becomes a 500
/// before the timeout and tracing see it, and CORS answers preflights before
/// any request id is assigned.
fn with_middleware(
    routes: Router<AppState>,
    config: &ServerConfig,
) -> Result<Router<AppState>, InvalidOrigin> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Ok(routes
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors_layer(config)?))
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, InvalidOrigin> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| InvalidOrigin {
                origin: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE])
        .max_age(config.cors_max_age()))
}
