//! Session-related types.

use serde::{Deserialize, Serialize};

use clotho_core::UserId;

/// The authenticated user the storefront acts for.
///
/// Established by an upstream authentication flow. The storefront only reads
/// it and passes it explicitly to every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user ID.
    pub id: UserId,
}

impl CurrentUser {
    /// Create a user context for `id`.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self { id }
    }
}
