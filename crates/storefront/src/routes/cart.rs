//! Cart route handlers.
//!
//! Adding to the cart also clears the product from the wishlist. The two
//! backend requests are independent: if the second one fails the product
//! stays in both, and the user is not told.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use clotho_core::ProductId;

use super::ToastTemplate;
use crate::error::add_breadcrumb;
use crate::middleware::RequireUser;
use crate::state::AppState;
use crate::view::actions;

/// Add a product to the user's cart (toast fragment).
///
/// A failed cart add is logged and answers `204 No Content` so no toast is
/// shown.
#[instrument(skip(state, user), fields(product_id = %id))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
) -> Response {
    let product = id.to_string();
    add_breadcrumb(
        "cart",
        "Add to cart",
        Some(&[("product_id", product.as_str())]),
    );

    let api = state.api();
    match actions::move_to_cart(api, api, user, id).await {
        Some(notification) => {
            ToastTemplate::new(&notification, state.config().toast_dismiss_after).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
