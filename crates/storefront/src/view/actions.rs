//! Wishlist and cart actions.
//!
//! Each action performs its backend requests and reports the outcome as a
//! [`Notification`]. The headless view and the HTTP routes share these.

use clotho_core::ProductId;

use super::notification::Notification;
use crate::api::types::CartItemRequest;
use crate::models::CurrentUser;
use crate::services::{CartService, WishlistService};

pub const ADDED_TO_WISHLIST: &str = "Added to wishlist!";
pub const WISHLIST_NOT_CONFIRMED: &str = "Something went wrong. Please try again.";
pub const ACTION_FAILED: &str = "An error occurred. Please try again later.";
pub const ADDED_TO_CART: &str = "Added to cart!";

/// Kind of user-triggered write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Wishlist,
    Cart,
}

/// Add a product to the user's wishlist.
///
/// Always yields exactly one notification: success for a confirmed write,
/// warning for any other accepted status, danger for a failed request.
pub async fn add_to_wishlist<W: WishlistService>(
    wishlist: &W,
    user: CurrentUser,
    product_id: ProductId,
) -> Notification {
    match wishlist.add_wishlist_item(user.id, product_id).await {
        Ok(status) if status.is_recognized() => Notification::success(ADDED_TO_WISHLIST),
        Ok(status) => {
            tracing::warn!(
                user_id = %user.id,
                product_id = %product_id,
                ?status,
                "Wishlist add not confirmed"
            );
            Notification::warning(WISHLIST_NOT_CONFIRMED)
        }
        Err(e) => {
            tracing::error!(
                user_id = %user.id,
                product_id = %product_id,
                error = %e,
                "Error adding to wishlist"
            );
            Notification::danger(ACTION_FAILED)
        }
    }
}

/// Add a product to the user's cart.
///
/// Any accepted status counts as success. A failed request is logged and
/// yields no notification.
pub async fn add_to_cart<C: CartService>(
    cart: &C,
    user: CurrentUser,
    product_id: ProductId,
) -> Option<Notification> {
    let item = CartItemRequest {
        user_id: user.id,
        product_id,
    };

    match cart.add_cart_item(item).await {
        Ok(_) => Some(Notification::success(ADDED_TO_CART)),
        Err(e) => {
            tracing::error!(
                user_id = %user.id,
                product_id = %product_id,
                error = %e,
                "Error adding to cart"
            );
            None
        }
    }
}

/// Best-effort removal of a product from the wishlist once it is in the cart.
///
/// The outcome is only logged. A failure leaves the product in both the
/// wishlist and the cart.
pub async fn clear_from_wishlist<W: WishlistService>(
    wishlist: &W,
    user: CurrentUser,
    product_id: ProductId,
) {
    match wishlist.remove_wishlist_item(user.id, product_id).await {
        Ok(status) if status.is_recognized() => {
            tracing::debug!(product_id = %product_id, "Removed carted product from wishlist");
        }
        Ok(status) => {
            tracing::warn!(product_id = %product_id, ?status, "Wishlist removal not confirmed");
        }
        Err(e) => {
            tracing::warn!(
                user_id = %user.id,
                product_id = %product_id,
                error = %e,
                "Failed to remove carted product from wishlist"
            );
        }
    }
}

/// Add to cart, then clear the product from the wishlist.
///
/// The two requests are not atomic. The wishlist removal is only attempted
/// when the cart add succeeded.
pub async fn move_to_cart<C: CartService, W: WishlistService>(
    cart: &C,
    wishlist: &W,
    user: CurrentUser,
    product_id: ProductId,
) -> Option<Notification> {
    let notification = add_to_cart(cart, user, product_id).await?;
    clear_from_wishlist(wishlist, user, product_id).await;
    Some(notification)
}
