//! Client for the Clotho backend REST API.
//!
//! # Architecture
//!
//! - One `reqwest` client shared by the Product, Wishlist and Cart services
//! - Wire records are decoded once here; nothing past this module sees the
//!   backend's field names or envelope shapes
//! - Product details are cached in memory via `moka` (listing is not cached)
//!
//! # Endpoints
//!
//! ```text
//! GET    {base}/products/listed                 - Listed products
//! GET    {base}/products/{id}                   - Product detail (with image)
//! POST   {base}/wishlist/{user_id}/{product_id} - Add wishlist item
//! DELETE {base}/wishlist/{user_id}/{product_id} - Remove wishlist item
//! POST   {base}/cart                            - Add cart item ({userId, productId})
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The configured base URL cannot have path segments appended.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
