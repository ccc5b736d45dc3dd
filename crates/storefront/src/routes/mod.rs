//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Catalog grid with search (?q=)
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (backend reachable)
//!
//! # Products
//! GET  /products/{id}/quick-view  - Detail overlay fragment
//!
//! # Actions (require an authenticated user, return toast fragments)
//! POST /wishlist/{id}             - Add to wishlist
//! POST /cart/{id}                 - Add to cart, then clear from wishlist
//! ```

pub mod cart;
pub mod health;
pub mod home;
pub mod products;
pub mod wishlist;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;

use crate::state::AppState;
use crate::view::Notification;

/// Toast notification fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub message: String,
    pub severity: &'static str,
    pub dismiss_ms: u64,
}

impl ToastTemplate {
    /// Render `notification`, auto-dismissing after `dismiss_after`.
    #[must_use]
    pub fn new(notification: &Notification, dismiss_after: Duration) -> Self {
        Self {
            message: notification.message.clone(),
            severity: notification.severity.as_str(),
            dismiss_ms: u64::try_from(dismiss_after.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}/quick-view", get(products::quick_view))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .route("/wishlist/{id}", post(wishlist::add))
        .route("/cart/{id}", post(cart::add))
}
