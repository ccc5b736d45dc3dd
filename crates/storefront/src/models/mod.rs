//! Domain models for the storefront.
//!
//! - [`Product`] - A catalog entry as the view sees it, decoded from the
//!   backend's wire format once at the API boundary
//! - [`CurrentUser`] - The authenticated user actions are performed for

pub mod product;
pub mod session;

pub use product::{Product, ProductImage, StockDisplay};
pub use session::CurrentUser;
