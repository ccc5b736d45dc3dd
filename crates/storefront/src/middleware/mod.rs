//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame options, etc.)
//!
//! [`RequireUser`] is an extractor rather than a layer; only action routes
//! need a user.

pub mod current_user;
pub mod request_id;
pub mod security_headers;

pub use current_user::RequireUser;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
