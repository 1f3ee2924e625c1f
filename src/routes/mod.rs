//! Router assembly and the middleware stack.

pub mod common;
mod user;

pub use common::{common_routes, HealthBody, ReadyBody};
pub use user::user_routes;

use crate::config::HttpConfig;
use crate::middleware::process_time;
use crate::state::AppState;
use axum::{middleware::from_fn, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Full application: common and user routes behind the middleware stack.
pub fn app(state: AppState, http: &HttpConfig) -> Router {
    with_middleware(
        Router::new().merge(common_routes(state.clone())).merge(user_routes(state)),
        http,
    )
}

/// Wrap `router` in CORS, body limit, timeout, timing and tracing, innermost first.
///
/// Each layer is applied on the `Router` so responses are converted back to axum
/// responses between layers.
pub fn with_middleware(router: Router, http: &HttpConfig) -> Router {
    let cors = if http.cors_permissive {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    router
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(http.body_limit))
        .layer(TimeoutLayer::new(http.request_timeout))
        .layer(from_fn(process_time))
        .layer(TraceLayer::new_for_http())
}
