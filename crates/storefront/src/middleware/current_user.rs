//! Current-user extractor.
//!
//! The storefront does not authenticate anyone itself. An upstream gateway
//! authenticates the visitor and forwards their backend user id in a
//! header (see `STOREFRONT_USER_HEADER`). Handlers that act on behalf of a
//! user take [`RequireUser`] and pass the user on explicitly.

use axum::{extract::FromRequestParts, http::request::Parts};

use clotho_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Rejects with `401 Unauthorized` when the header is missing or malformed.
pub struct RequireUser(pub CurrentUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = user_from_parts(parts, &state.config().user_header)?;
        set_sentry_user(&user.id);
        Ok(Self(user))
    }
}

/// Read the current user from `header`.
fn user_from_parts(parts: &Parts, header: &str) -> Result<CurrentUser, AppError> {
    let raw = parts
        .headers
        .get(header)
        .ok_or_else(|| AppError::Unauthorized("no authenticated user".to_string()))?;

    let id = raw
        .to_str()
        .ok()
        .and_then(|value| value.parse::<UserId>().ok())
        .ok_or_else(|| AppError::Unauthorized("malformed user id".to_string()))?;

    Ok(CurrentUser::new(id))
}
