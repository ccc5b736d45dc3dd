//! Product detail overlay state.

use clotho_core::ProductId;

use super::inflight::{InFlight, RequestToken};
use crate::api::ApiError;
use crate::models::Product;

/// Handle for one outstanding detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub product_id: ProductId,
    token: RequestToken,
}

/// What the overlay currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState<'a> {
    /// Nothing selected.
    Closed,
    /// A product is selected but its detail has not arrived.
    Loading(ProductId),
    /// Detail loaded.
    Showing(&'a Product),
}

/// Selection, detail and visibility for the product overlay.
///
/// The overlay becomes visible when a detail arrives and stays visible until
/// closed. Selecting another product while visible shows the loading
/// placeholder until that product's detail arrives.
#[derive(Debug, Default)]
pub struct DetailOverlay {
    selected_id: Option<ProductId>,
    detail: Option<Product>,
    visible: bool,
    requests: InFlight,
}

impl DetailOverlay {
    /// Select `product_id` and issue a ticket for its detail request.
    pub fn begin(&mut self, product_id: ProductId) -> DetailTicket {
        self.selected_id = Some(product_id);
        self.detail = None;
        DetailTicket {
            product_id,
            token: self.requests.issue(),
        }
    }

    /// Apply the result of a detail request.
    ///
    /// Returns `false` if the ticket was superseded by a newer selection or
    /// by closing the overlay; the result is then discarded. Failures are
    /// logged and leave the overlay loading.
    pub fn finish(&mut self, ticket: DetailTicket, result: Result<Product, ApiError>) -> bool {
        if !self.requests.is_current(ticket.token) {
            tracing::debug!(product_id = %ticket.product_id, "Discarding stale product detail");
            return false;
        }

        match result {
            Ok(product) => {
                self.detail = Some(product);
                self.visible = true;
            }
            Err(e) => {
                tracing::error!(
                    product_id = %ticket.product_id,
                    error = %e,
                    "Error fetching product details"
                );
            }
        }
        true
    }

    /// Hide the overlay and clear the selection.
    ///
    /// Outstanding detail requests become stale.
    pub fn close(&mut self) {
        self.visible = false;
        self.selected_id = None;
        self.detail = None;
        self.requests.invalidate();
    }

    #[must_use]
    pub fn state(&self) -> OverlayState<'_> {
        match (&self.detail, self.selected_id) {
            (Some(product), _) => OverlayState::Showing(product),
            (None, Some(id)) => OverlayState::Loading(id),
            (None, None) => OverlayState::Closed,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn selected_id(&self) -> Option<ProductId> {
        self.selected_id
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&Product> {
        self.detail.as_ref()
    }
}
