//! Wishlist route handlers.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use clotho_core::ProductId;

use super::ToastTemplate;
use crate::error::add_breadcrumb;
use crate::middleware::RequireUser;
use crate::state::AppState;
use crate::view::actions;

/// Add a product to the user's wishlist (toast fragment).
#[instrument(skip(state, user), fields(product_id = %id))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
) -> impl IntoResponse {
    let product = id.to_string();
    add_breadcrumb(
        "wishlist",
        "Add to wishlist",
        Some(&[("product_id", product.as_str())]),
    );

    let notification = actions::add_to_wishlist(state.api(), user, id).await;
    ToastTemplate::new(&notification, state.config().toast_dismiss_after)
}
