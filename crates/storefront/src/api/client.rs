//! Backend API client implementation.
//!
//! Uses `reqwest` for HTTP. Caches product details using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use clotho_core::{ProductId, UserId};

use super::ApiError;
use super::conversions::convert_product;
use super::types::{CartItemRequest, ProductListPayload, ProductRecord};
use crate::config::ClothoApiConfig;
use crate::models::Product;
use crate::services::{ActionStatus, CartService, ProductService, WishlistService};

/// Maximum number of cached product details.
const DETAIL_CACHE_CAPACITY: u64 = 500;

/// Characters of a response body kept in logs and errors.
const BODY_SNIPPET_LEN: usize = 200;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Clotho backend API.
///
/// Cheap to clone; clones share the connection pool and detail cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    detail_cache: Option<Cache<ProductId, Product>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// cannot carry path segments.
    pub fn new(config: &ClothoApiConfig) -> Result<Self, ApiError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let detail_cache = (!config.detail_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(DETAIL_CACHE_CAPACITY)
                .time_to_live(config.detail_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
                detail_cache,
            }),
        })
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request, attaching the bearer token when configured.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(response.url().path().to_string()));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&response_text),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: snippet(&response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&response_text),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a write request and classify the response status.
    async fn send_action(&self, builder: RequestBuilder) -> Result<ActionStatus, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(ActionStatus::from_status_code(status.as_u16()))
    }

    /// Check that the backend is reachable.
    ///
    /// Any answer below 500 counts as reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers with a
    /// server error.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["products", "listed"])?;
        let response = self.request(Method::HEAD, url).send().await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        Ok(())
    }
}

impl ProductService for ApiClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["products", "listed"])?;
        let payload: ProductListPayload = self.get_json(url).await?;

        let products: Vec<Product> = payload
            .into_records()
            .into_iter()
            .map(convert_product)
            .collect();

        debug!(count = products.len(), "Fetched listed products");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        if let Some(cache) = &self.inner.detail_cache
            && let Some(product) = cache.get(&id).await
        {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let id_segment = id.to_string();
        let url = self.endpoint(&["products", &id_segment])?;
        let record: ProductRecord = self.get_json(url).await?;
        let product = convert_product(record);

        if let Some(cache) = &self.inner.detail_cache {
            cache.insert(id, product.clone()).await;
        }

        Ok(product)
    }
}

impl WishlistService for ApiClient {
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    async fn add_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<ActionStatus, ApiError> {
        let url = self.wishlist_url(user_id, product_id)?;
        self.send_action(self.request(Method::POST, url)).await
    }

    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    async fn remove_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<ActionStatus, ApiError> {
        let url = self.wishlist_url(user_id, product_id)?;
        self.send_action(self.request(Method::DELETE, url)).await
    }
}

impl CartService for ApiClient {
    #[instrument(skip(self), fields(user_id = %item.user_id, product_id = %item.product_id))]
    async fn add_cart_item(&self, item: CartItemRequest) -> Result<ActionStatus, ApiError> {
        let url = self.endpoint(&["cart"])?;
        self.send_action(self.request(Method::POST, url).json(&item))
            .await
    }
}

impl ApiClient {
    fn wishlist_url(&self, user_id: UserId, product_id: ProductId) -> Result<Url, ApiError> {
        let user = user_id.to_string();
        let product = product_id.to_string();
        self.endpoint(&["wishlist", &user, &product])
    }
}

/// Truncate a response body for logging.
fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
