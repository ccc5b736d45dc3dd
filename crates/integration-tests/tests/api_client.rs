//! Integration tests for the backend API client and the headless view.
//!
//! These drive [`ApiClient`] against a fake backend over HTTP.

use std::time::Duration;

use clotho_core::{ProductId, Severity, UserId};
use clotho_integration_tests::{BackendCall, Behavior, FakeBackend};
use clotho_storefront::api::{ApiClient, ApiError};
use clotho_storefront::config::ClothoApiConfig;
use clotho_storefront::models::CurrentUser;
use clotho_storefront::services::{ActionStatus, ProductService, WishlistService};
use clotho_storefront::view::{OverlayState, StorefrontView};

fn client(backend: &FakeBackend, cache: Duration) -> ApiClient {
    let mut config = ClothoApiConfig::new(backend.url.clone());
    config.detail_cache_ttl = cache;
    ApiClient::new(&config).unwrap_or_else(|e| panic!("client: {e}"))
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn test_list_products_decodes_wire_format() {
    let backend = FakeBackend::start(Behavior::default()).await;
    let api = client(&backend, Duration::ZERO);

    let products = api
        .list_products()
        .await
        .unwrap_or_else(|e| panic!("list: {e}"));
    assert_eq!(products.len(), 3);

    let shirt = &products[0];
    assert_eq!(shirt.id, ProductId::new(1));
    assert_eq!(shirt.name, "Red Shirt");
    assert_eq!(shirt.quantity, 6);
    assert!(shirt.premium);
    assert_eq!(
        shirt.image_data_uri().as_deref(),
        Some("data:image/png;base64,aGVsbG8=")
    );
}

#[tokio::test]
async fn test_get_product_not_found() {
    let backend = FakeBackend::start(Behavior::default()).await;
    let api = client(&backend, Duration::ZERO);

    let result = api.get_product(ProductId::new(99)).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_detail_cache_serves_repeat_lookups() {
    let backend = FakeBackend::start(Behavior::default()).await;
    let api = client(&backend, Duration::from_secs(60));

    for _ in 0..3 {
        let product = api
            .get_product(ProductId::new(2))
            .await
            .unwrap_or_else(|e| panic!("get: {e}"));
        assert_eq!(product.name, "Blue Hat");
    }

    assert_eq!(backend.calls(), vec![BackendCall::GetProduct(2)]);
}

#[tokio::test]
async fn test_wishlist_status_classification() {
    let backend = FakeBackend::start(Behavior {
        wishlist_add: 202,
        wishlist_remove: 404,
        ..Behavior::default()
    })
    .await;
    let api = client(&backend, Duration::ZERO);

    let added = api
        .add_wishlist_item(UserId::new(7), ProductId::new(1))
        .await
        .unwrap_or_else(|e| panic!("add: {e}"));
    assert_eq!(added, ActionStatus::Unrecognized(202));

    let removed = api
        .remove_wishlist_item(UserId::new(7), ProductId::new(1))
        .await;
    assert!(matches!(
        removed,
        Err(ApiError::Status { status: 404, .. })
    ));
}

// =============================================================================
// Headless View
// =============================================================================

#[tokio::test]
async fn test_view_browse_and_buy_flow() {
    let backend = FakeBackend::start(Behavior::default()).await;
    let api = client(&backend, Duration::ZERO);
    let user = CurrentUser::new(UserId::new(7));

    let mut view = StorefrontView::new(&api, &api, &api, user);
    view.mount().await;
    view.mount().await;
    assert_eq!(view.catalog().len(), 3);

    view.set_query("hat");
    let visible: Vec<_> = view.visible_products().iter().map(|p| p.id).collect();
    assert_eq!(visible, vec![ProductId::new(2)]);

    view.view_product(ProductId::new(2)).await;
    assert!(matches!(
        view.overlay().state(),
        OverlayState::Showing(p) if p.name == "Blue Hat"
    ));

    view.add_detail_to_cart().await;
    let notification = view
        .notification()
        .unwrap_or_else(|| panic!("expected a notification"));
    assert_eq!(notification.message, "Added to cart!");
    assert_eq!(notification.severity, Severity::Success);

    view.close_detail();
    assert!(matches!(view.overlay().state(), OverlayState::Closed));

    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::ListProducts,
            BackendCall::GetProduct(2),
            BackendCall::AddCart(serde_json::json!({ "userId": 7, "productId": 2 })),
            BackendCall::RemoveWishlist {
                user: 7,
                product: 2
            },
        ]
    );
}

#[tokio::test]
async fn test_view_survives_unreachable_backend() {
    let backend = FakeBackend::start(Behavior {
        list_status: 500,
        wishlist_add: 500,
        ..Behavior::default()
    })
    .await;
    let api = client(&backend, Duration::ZERO);
    let mut view = StorefrontView::new(&api, &api, &api, CurrentUser::new(UserId::new(7)));

    view.mount().await;
    assert!(view.catalog().is_empty());
    assert!(view.visible_products().is_empty());

    view.add_to_wishlist(ProductId::new(1)).await;
    let notification = view
        .notification()
        .unwrap_or_else(|| panic!("expected a notification"));
    assert_eq!(notification.severity, Severity::Danger);
}
