//! Integration tests for the Clotho storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clotho-integration-tests
//! ```
//!
//! Each test starts a [`FakeBackend`] standing in for the product, wishlist
//! and cart services, then a storefront pointed at it. Both listen on
//! ephemeral loopback ports.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use clotho_storefront::config::{ClothoApiConfig, DEFAULT_USER_HEADER, StorefrontConfig};
use clotho_storefront::state::AppState;

/// Header the storefront reads the current user from.
pub const USER_HEADER: &str = DEFAULT_USER_HEADER;

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    ListProducts,
    GetProduct(i64),
    AddWishlist { user: i64, product: i64 },
    RemoveWishlist { user: i64, product: i64 },
    AddCart(Value),
}

/// How the fake backend answers.
#[derive(Debug, Clone)]
pub struct Behavior {
    pub products: Vec<Value>,
    /// Wrap the listing in `{"data": [...]}`.
    pub envelope: bool,
    pub list_status: u16,
    pub wishlist_add: u16,
    pub wishlist_remove: u16,
    pub cart_add: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            products: vec![
                product_json(1, "Red Shirt", 6),
                product_json(2, "Blue Hat", 1),
                product_json(3, "Green Scarf", 3),
            ],
            envelope: false,
            list_status: 200,
            wishlist_add: 200,
            wishlist_remove: 200,
            cart_add: 200,
        }
    }
}

/// Backend wire record for a product.
#[must_use]
pub fn product_json(id: i64, name: &str, qty: i64) -> Value {
    json!({
        "id": id,
        "pname": name,
        "price": "19.50",
        "category": "Clothing",
        "psize": "M",
        "premium": id % 2 == 1,
        "description": format!("{name} description"),
        "qty": qty,
        "img": "aGVsbG8=",
        "imgType": "image/png",
    })
}

#[derive(Clone)]
struct BackendState {
    behavior: Arc<Behavior>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl BackendState {
    fn record(&self, call: BackendCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn list_products(State(state): State<BackendState>) -> Response {
    state.record(BackendCall::ListProducts);
    let code = status(state.behavior.list_status);
    if !code.is_success() {
        return (code, "backend unavailable").into_response();
    }

    let products = Value::Array(state.behavior.products.clone());
    if state.behavior.envelope {
        Json(json!({ "data": products })).into_response()
    } else {
        Json(products).into_response()
    }
}

async fn get_product(State(state): State<BackendState>, Path(id): Path<i64>) -> Response {
    state.record(BackendCall::GetProduct(id));
    state
        .behavior
        .products
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

async fn add_wishlist(
    State(state): State<BackendState>,
    Path((user, product)): Path<(i64, i64)>,
) -> StatusCode {
    state.record(BackendCall::AddWishlist { user, product });
    status(state.behavior.wishlist_add)
}

async fn remove_wishlist(
    State(state): State<BackendState>,
    Path((user, product)): Path<(i64, i64)>,
) -> StatusCode {
    state.record(BackendCall::RemoveWishlist { user, product });
    status(state.behavior.wishlist_remove)
}

async fn add_cart(State(state): State<BackendState>, Json(body): Json<Value>) -> StatusCode {
    state.record(BackendCall::AddCart(body));
    status(state.behavior.cart_add)
}

/// In-process stand-in for the backend REST API.
pub struct FakeBackend {
    pub url: Url,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl FakeBackend {
    /// Start a backend answering per `behavior`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(behavior: Behavior) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            behavior: Arc::new(behavior),
            calls: Arc::clone(&calls),
        };

        let router = Router::new()
            .route("/products/listed", get(list_products))
            .route("/products/{id}", get(get_product))
            .route(
                "/wishlist/{user}/{product}",
                post(add_wishlist).delete(remove_wishlist),
            )
            .route("/cart", post(add_cart))
            .with_state(state);

        let addr = serve(router).await;
        let url = Url::parse(&format!("http://{addr}/")).expect("valid backend url");

        Self { url, calls }
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A running storefront and an HTTP client for it.
pub struct TestStorefront {
    pub base: String,
    pub client: reqwest::Client,
}

impl TestStorefront {
    /// Start a storefront against `backend` with detail caching disabled.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the state cannot be built.
    pub async fn start(backend: &FakeBackend) -> Self {
        let mut api = ClothoApiConfig::new(backend.url.clone());
        api.detail_cache_ttl = Duration::ZERO;

        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            toast_dismiss_after: Duration::from_secs(3),
            user_header: USER_HEADER.to_string(),
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static").into(),
            api,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(config).expect("storefront state");
        let addr = serve(clotho_storefront::app(state)).await;

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// POST `path` as `user`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_as(&self, user: i64, path: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header(USER_HEADER, user.to_string())
            .send()
            .await
            .expect("storefront request")
    }

    /// GET `path` and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent or the body cannot be read.
    pub async fn get(&self, path: &str) -> (u16, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("storefront request");
        let code = response.status().as_u16();
        (code, response.text().await.expect("response body"))
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}
