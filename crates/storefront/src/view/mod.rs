//! Headless storefront view.
//!
//! [`StorefrontView`] holds everything one catalog page needs: the loaded
//! catalog, the search query, the product detail overlay and the
//! notification slot. It is generic over the collaborator services and
//! receives the current user at construction.
//!
//! # Stale responses
//!
//! Detail loads and actions carry a request token. A response whose token
//! was superseded (a newer request of the same kind, or the overlay being
//! closed) is logged and otherwise discarded, so late responses never
//! repopulate state the user has already moved past. Requests are never
//! cancelled or de-duplicated.

pub mod actions;
pub mod detail;
pub mod inflight;
pub mod notification;
pub mod search;

#[cfg(test)]
pub mod testing;

use std::time::{Duration, Instant};

use clotho_core::ProductId;

use crate::api::ApiError;
use crate::models::{CurrentUser, Product};
use crate::services::{CartService, ProductService, WishlistService};

pub use actions::ActionKind;
pub use detail::{DetailOverlay, DetailTicket, OverlayState};
pub use inflight::{InFlight, RequestToken};
pub use notification::{DEFAULT_DISMISS_AFTER, Notification, NotificationSlot};
pub use search::{SearchQuery, filter_products};

/// Handle for one outstanding action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTicket {
    pub kind: ActionKind,
    pub product_id: ProductId,
    token: RequestToken,
}

/// One instance of the catalog page.
pub struct StorefrontView<P, W, C> {
    products: P,
    wishlist: W,
    cart: C,
    user: CurrentUser,
    catalog: Vec<Product>,
    mounted: bool,
    query: SearchQuery,
    overlay: DetailOverlay,
    notifications: NotificationSlot,
    wishlist_requests: InFlight,
    cart_requests: InFlight,
}

impl<P, W, C> StorefrontView<P, W, C>
where
    P: ProductService,
    W: WishlistService,
    C: CartService,
{
    /// Create a view for `user` over the given services.
    pub fn new(products: P, wishlist: W, cart: C, user: CurrentUser) -> Self {
        Self {
            products,
            wishlist,
            cart,
            user,
            catalog: Vec::new(),
            mounted: false,
            query: SearchQuery::default(),
            overlay: DetailOverlay::default(),
            notifications: NotificationSlot::default(),
            wishlist_requests: InFlight::default(),
            cart_requests: InFlight::default(),
        }
    }

    /// Override the notification auto-dismiss delay.
    #[must_use]
    pub fn with_dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.notifications = NotificationSlot::new(dismiss_after);
        self
    }

    #[must_use]
    pub const fn user(&self) -> CurrentUser {
        self.user
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Load the listed products. Runs once per view; later calls do nothing.
    ///
    /// On failure the error is logged and the catalog stays empty.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        match self.products.list_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog loaded");
                self.catalog = products;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
            }
        }
    }

    /// The catalog as returned by the backend.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Replace the search text.
    pub fn set_query(&mut self, input: &str) {
        self.query.set(input);
    }

    /// The lower-cased search text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Catalog entries matching the current query.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(&self.catalog, &self.query)
    }

    // =========================================================================
    // Detail overlay
    // =========================================================================

    /// Select a product and load its detail into the overlay.
    pub async fn view_product(&mut self, product_id: ProductId) {
        let ticket = self.begin_view_product(product_id);
        let result = self.products.get_product(product_id).await;
        self.finish_view_product(ticket, result);
    }

    /// Select a product and issue a ticket for its detail request.
    pub fn begin_view_product(&mut self, product_id: ProductId) -> DetailTicket {
        self.overlay.begin(product_id)
    }

    /// Apply a detail response. Returns `false` if it was stale.
    pub fn finish_view_product(
        &mut self,
        ticket: DetailTicket,
        result: Result<Product, ApiError>,
    ) -> bool {
        self.overlay.finish(ticket, result)
    }

    /// Close the overlay and clear the selection.
    pub fn close_detail(&mut self) {
        self.overlay.close();
    }

    #[must_use]
    pub const fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Issue a ticket for an action request.
    pub const fn begin_action(&mut self, kind: ActionKind, product_id: ProductId) -> ActionTicket {
        let token = match kind {
            ActionKind::Wishlist => self.wishlist_requests.issue(),
            ActionKind::Cart => self.cart_requests.issue(),
        };
        ActionTicket {
            kind,
            product_id,
            token,
        }
    }

    /// Apply an action's outcome to the notification slot.
    ///
    /// Returns `false` if a newer action of the same kind was issued since,
    /// in which case the notification is dropped.
    pub fn finish_action(&mut self, ticket: ActionTicket, outcome: Option<Notification>) -> bool {
        let requests = match ticket.kind {
            ActionKind::Wishlist => &self.wishlist_requests,
            ActionKind::Cart => &self.cart_requests,
        };
        if !requests.is_current(ticket.token) {
            tracing::debug!(
                kind = ?ticket.kind,
                product_id = %ticket.product_id,
                "Discarding outcome of superseded action"
            );
            return false;
        }

        if let Some(notification) = outcome {
            self.notifications.show(notification, Instant::now());
        }
        true
    }

    /// Add a product to the current user's wishlist.
    pub async fn add_to_wishlist(&mut self, product_id: ProductId) {
        let ticket = self.begin_action(ActionKind::Wishlist, product_id);
        let notification = actions::add_to_wishlist(&self.wishlist, self.user, product_id).await;
        self.finish_action(ticket, Some(notification));
    }

    /// Add a product to the cart, then clear it from the wishlist.
    ///
    /// The success notification is shown before the wishlist removal is
    /// sent. The removal's outcome is never surfaced.
    pub async fn add_to_cart(&mut self, product_id: ProductId) {
        let ticket = self.begin_action(ActionKind::Cart, product_id);
        let outcome = actions::add_to_cart(&self.cart, self.user, product_id).await;
        let succeeded = outcome.is_some();
        self.finish_action(ticket, outcome);

        if succeeded {
            actions::clear_from_wishlist(&self.wishlist, self.user, product_id).await;
        }
    }

    /// Wishlist action for the product shown in the overlay.
    ///
    /// Does nothing while no detail is loaded.
    pub async fn add_detail_to_wishlist(&mut self) {
        if let Some(id) = self.overlay.detail().map(|p| p.id) {
            self.add_to_wishlist(id).await;
        }
    }

    /// Cart action for the product shown in the overlay.
    ///
    /// Does nothing while no detail is loaded.
    pub async fn add_detail_to_cart(&mut self) {
        if let Some(id) = self.overlay.detail().map(|p| p.id) {
            self.add_to_cart(id).await;
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// The notification visible right now.
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification_at(Instant::now())
    }

    /// The notification visible at `now`.
    #[must_use]
    pub fn notification_at(&self, now: Instant) -> Option<&Notification> {
        self.notifications.visible_at(now)
    }

    /// Dismiss the visible notification.
    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    /// Drop the notification if it has expired at `now`.
    pub fn expire_notifications(&mut self, now: Instant) -> bool {
        self.notifications.expire(now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clotho_core::{Severity, UserId};

    use super::testing::{Call, FakeBackend, Reply, product};
    use super::*;
    use crate::models::StockDisplay;

    const USER: CurrentUser = CurrentUser::new(UserId::new(77));

    fn view(backend: &FakeBackend) -> StorefrontView<&FakeBackend, &FakeBackend, &FakeBackend> {
        StorefrontView::new(backend, backend, backend, USER)
    }

    fn shown(view: &StorefrontView<&FakeBackend, &FakeBackend, &FakeBackend>) -> (String, Severity) {
        let n = view.notification().unwrap();
        (n.message.clone(), n.severity)
    }

    #[tokio::test]
    async fn test_mount_loads_catalog_in_order() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.mount().await;

        let ids: Vec<i64> = view.catalog().iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_mount_runs_once() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.mount().await;
        view.mount().await;

        assert_eq!(backend.count(|c| *c == Call::ListProducts), 1);
    }

    #[tokio::test]
    async fn test_mount_failure_leaves_catalog_empty() {
        let backend = FakeBackend {
            fail_listing: true,
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.mount().await;

        assert!(view.catalog().is_empty());
        assert!(view.visible_products().is_empty());
        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn test_search_scenario_with_stock_display() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.mount().await;

        view.set_query("red");
        let visible = view.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, ProductId::new(1));
        assert_eq!(visible[0].stock(), StockDisplay::InStock(6));

        view.set_query("");
        let hat = view
            .visible_products()
            .into_iter()
            .find(|p| p.id == ProductId::new(2))
            .unwrap();
        assert_eq!(hat.stock().label(), "Hurry! Only 1 item left");
    }

    #[tokio::test]
    async fn test_view_then_close_resets_selection() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);

        view.view_product(ProductId::new(1)).await;
        assert!(view.overlay().is_visible());
        assert!(matches!(view.overlay().state(), OverlayState::Showing(p) if p.id == ProductId::new(1)));

        view.close_detail();
        assert_eq!(view.overlay().state(), OverlayState::Closed);
        assert!(!view.overlay().is_visible());
    }

    #[tokio::test]
    async fn test_close_before_detail_arrives() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);

        let ticket = view.begin_view_product(ProductId::new(2));
        view.close_detail();
        let late = backend.get_product(ProductId::new(2)).await;

        assert!(!view.finish_view_product(ticket, late));
        assert_eq!(view.overlay().state(), OverlayState::Closed);
        assert_eq!(view.overlay().selected_id(), None);
    }

    #[tokio::test]
    async fn test_detail_failure_stays_loading() {
        let backend = FakeBackend {
            fail_detail: true,
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.view_product(ProductId::new(1)).await;

        assert_eq!(view.overlay().state(), OverlayState::Loading(ProductId::new(1)));
        assert!(view.notification().is_none());

        view.close_detail();
        assert_eq!(view.overlay().state(), OverlayState::Closed);
    }

    #[tokio::test]
    async fn test_wishlist_success() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.add_to_wishlist(ProductId::new(1)).await;

        assert_eq!(
            shown(&view),
            (actions::ADDED_TO_WISHLIST.to_string(), Severity::Success)
        );
        assert_eq!(
            backend.calls(),
            vec![Call::AddWishlist(USER.id, ProductId::new(1))]
        );
    }

    #[tokio::test]
    async fn test_wishlist_unrecognized_status_warns() {
        let backend = FakeBackend {
            wishlist_add: Reply::Status(201),
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.add_to_wishlist(ProductId::new(1)).await;

        assert_eq!(
            shown(&view),
            (actions::WISHLIST_NOT_CONFIRMED.to_string(), Severity::Warning)
        );
    }

    #[tokio::test]
    async fn test_wishlist_failure_is_danger() {
        let backend = FakeBackend {
            wishlist_add: Reply::Fail,
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.add_to_wishlist(ProductId::new(1)).await;

        assert_eq!(
            shown(&view),
            (actions::ACTION_FAILED.to_string(), Severity::Danger)
        );
    }

    #[tokio::test]
    async fn test_add_to_cart_moves_from_wishlist() {
        let backend = FakeBackend {
            products: vec![product(5, "Green Socks", 9)],
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.add_to_cart(ProductId::new(5)).await;

        assert_eq!(
            shown(&view),
            ("Added to cart!".to_string(), Severity::Success)
        );
        assert_eq!(
            backend.calls(),
            vec![
                Call::AddCart(USER.id, ProductId::new(5)),
                Call::RemoveWishlist(USER.id, ProductId::new(5)),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_cart_add_skips_wishlist_removal() {
        let backend = FakeBackend {
            cart_add: Reply::Fail,
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.add_to_cart(ProductId::new(1)).await;

        assert!(view.notification().is_none());
        assert_eq!(
            backend.count(|c| matches!(c, Call::RemoveWishlist(..))),
            0
        );
    }

    #[tokio::test]
    async fn test_wishlist_removal_failure_is_silent() {
        let backend = FakeBackend {
            wishlist_remove: Reply::Fail,
            ..FakeBackend::default()
        };
        let mut view = view(&backend);
        view.add_to_cart(ProductId::new(1)).await;

        assert_eq!(
            shown(&view),
            (actions::ADDED_TO_CART.to_string(), Severity::Success)
        );
    }

    #[tokio::test]
    async fn test_repeated_actions_are_not_deduplicated() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.add_to_wishlist(ProductId::new(2)).await;
        view.add_to_wishlist(ProductId::new(2)).await;

        assert_eq!(backend.count(|c| matches!(c, Call::AddWishlist(..))), 2);
    }

    #[tokio::test]
    async fn test_superseded_action_outcome_is_dropped() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);

        let first = view.begin_action(ActionKind::Wishlist, ProductId::new(1));
        let second = view.begin_action(ActionKind::Wishlist, ProductId::new(2));

        assert!(view.finish_action(second, Some(Notification::success("second"))));
        assert!(!view.finish_action(first, Some(Notification::danger("first"))));
        assert_eq!(view.notification().unwrap().message, "second");
    }

    #[tokio::test]
    async fn test_action_kinds_are_tracked_separately() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);

        let wishlist = view.begin_action(ActionKind::Wishlist, ProductId::new(1));
        let cart = view.begin_action(ActionKind::Cart, ProductId::new(1));

        assert!(view.finish_action(wishlist, Some(Notification::success("w"))));
        assert!(view.finish_action(cart, Some(Notification::success("c"))));
        assert_eq!(view.notification().unwrap().message, "c");
    }

    #[tokio::test]
    async fn test_notification_auto_dismisses() {
        let backend = FakeBackend::default();
        let mut view = view(&backend).with_dismiss_after(Duration::from_secs(3));
        let before = Instant::now();
        view.add_to_wishlist(ProductId::new(1)).await;

        assert!(view.notification().is_some());
        assert!(view.notification_at(before + Duration::from_secs(10)).is_none());
        assert!(view.expire_notifications(before + Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_manual_dismiss() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);
        view.add_to_wishlist(ProductId::new(1)).await;
        view.dismiss_notification();

        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn test_detail_buttons_act_on_loaded_product() {
        let backend = FakeBackend::default();
        let mut view = view(&backend);

        // Nothing loaded yet: no requests.
        view.add_detail_to_cart().await;
        view.add_detail_to_wishlist().await;
        assert!(backend.calls().is_empty());

        view.view_product(ProductId::new(2)).await;
        view.add_detail_to_cart().await;

        assert!(backend.calls().contains(&Call::AddCart(USER.id, ProductId::new(2))));
        assert!(
            backend
                .calls()
                .contains(&Call::RemoveWishlist(USER.id, ProductId::new(2)))
        );
    }
}
