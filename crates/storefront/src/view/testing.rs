//! In-memory services for view tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use clotho_core::{Price, ProductId, UserId};
use rust_decimal::Decimal;

use crate::api::ApiError;
use crate::api::types::CartItemRequest;
use crate::models::Product;
use crate::services::{ActionStatus, CartService, ProductService, WishlistService};

/// Canned answer for a write request.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16),
    Fail,
}

impl Reply {
    fn into_result(self) -> Result<ActionStatus, ApiError> {
        match self {
            Self::Status(code) => Ok(ActionStatus::from_status_code(code)),
            Self::Fail => Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            }),
        }
    }
}

/// A recorded backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ListProducts,
    GetProduct(ProductId),
    AddWishlist(UserId, ProductId),
    RemoveWishlist(UserId, ProductId),
    AddCart(UserId, ProductId),
}

pub struct FakeBackend {
    pub products: Vec<Product>,
    pub fail_listing: bool,
    pub fail_detail: bool,
    pub wishlist_add: Reply,
    pub wishlist_remove: Reply,
    pub cart_add: Reply,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            products: vec![product(1, "Red Shirt", 6), product(2, "Blue Hat", 1)],
            fail_listing: false,
            fail_detail: false,
            wishlist_add: Reply::Status(200),
            wishlist_remove: Reply::Status(200),
            cart_add: Reply::Status(200),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn product(id: i64, name: &str, quantity: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::usd(Decimal::new(1999, 2)),
        category: Some("Tops".to_string()),
        size: Some("M".to_string()),
        premium: false,
        description: Some("Soft cotton".to_string()),
        quantity,
        image: None,
    }
}

impl ProductService for FakeBackend {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(Call::ListProducts);
        if self.fail_listing {
            return Err(ApiError::Status {
                status: 503,
                body: String::new(),
            });
        }
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.record(Call::GetProduct(id));
        if self.fail_detail {
            return Err(ApiError::NotFound(format!("/products/{id}")));
        }
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/products/{id}")))
    }
}

impl WishlistService for FakeBackend {
    async fn add_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<ActionStatus, ApiError> {
        self.record(Call::AddWishlist(user_id, product_id));
        self.wishlist_add.into_result()
    }

    async fn remove_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<ActionStatus, ApiError> {
        self.record(Call::RemoveWishlist(user_id, product_id));
        self.wishlist_remove.into_result()
    }
}

impl CartService for FakeBackend {
    async fn add_cart_item(&self, item: CartItemRequest) -> Result<ActionStatus, ApiError> {
        self.record(Call::AddCart(item.user_id, item.product_id));
        self.cart_add.into_result()
    }
}
