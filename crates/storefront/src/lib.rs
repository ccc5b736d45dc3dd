//! Clotho Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! - [`view`] - Headless catalog page: search, detail overlay, actions,
//!   notifications
//! - [`api`] - HTTP client for the backend product, wishlist and cart
//!   services
//! - [`routes`] - Server-rendered pages and fragments over the same
//!   components

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod view;

use axum::Router;
use axum::http::Request;
use axum::middleware::from_fn;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span for one HTTP request. `request_id` is filled in by
/// [`middleware::request_id_middleware`].
fn request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
