//! Collaborator services the storefront view is built on.
//!
//! # Services
//!
//! - [`ProductService`] - Catalog listing and per-product detail
//! - [`WishlistService`] - Wishlist membership writes
//! - [`CartService`] - Cart membership writes
//!
//! [`crate::api::ApiClient`] implements all three over HTTP. Tests provide
//! in-memory implementations.
//!
//! Wishlist and cart are independent services: moving a product from the
//! wishlist to the cart is two requests with no atomicity between them.

use std::future::Future;

use clotho_core::{ProductId, UserId};

use crate::api::ApiError;
use crate::api::types::CartItemRequest;
use crate::models::Product;

/// HTTP status the backend uses for a completed write.
const RECOGNIZED_SUCCESS_STATUS: u16 = 200;

/// Outcome of a write request the backend accepted.
///
/// Failed requests are reported as [`ApiError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The backend confirmed the write.
    Recognized,
    /// A success-class status other than the one the backend uses for
    /// confirmed writes.
    Unrecognized(u16),
}

impl ActionStatus {
    /// Classify a success-class HTTP status code.
    #[must_use]
    pub const fn from_status_code(code: u16) -> Self {
        if code == RECOGNIZED_SUCCESS_STATUS {
            Self::Recognized
        } else {
            Self::Unrecognized(code)
        }
    }

    /// Whether the write was confirmed.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized)
    }
}

/// Read access to the product catalog.
pub trait ProductService: Send + Sync {
    /// List every product currently listed for sale, in backend order.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch one product's full record, including its image.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;
}

/// Wishlist membership writes.
pub trait WishlistService: Send + Sync {
    /// Add `product_id` to `user_id`'s wishlist.
    fn add_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send;

    /// Remove `product_id` from `user_id`'s wishlist.
    fn remove_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send;
}

/// Cart membership writes.
pub trait CartService: Send + Sync {
    /// Add one item to a user's cart.
    fn add_cart_item(
        &self,
        item: CartItemRequest,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send;
}

impl<T: ProductService> ProductService for &T {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
        (**self).list_products()
    }

    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send {
        (**self).get_product(id)
    }
}

impl<T: WishlistService> WishlistService for &T {
    fn add_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send {
        (**self).add_wishlist_item(user_id, product_id)
    }

    fn remove_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send {
        (**self).remove_wishlist_item(user_id, product_id)
    }
}

impl<T: CartService> CartService for &T {
    fn add_cart_item(
        &self,
        item: CartItemRequest,
    ) -> impl Future<Output = Result<ActionStatus, ApiError>> + Send {
        (**self).add_cart_item(item)
    }
}
