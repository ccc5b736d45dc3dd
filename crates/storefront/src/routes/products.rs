//! Product route handlers and template views.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use clotho_core::ProductId;

use crate::models::Product;
use crate::services::ProductService;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    /// Lower-cased name, matched by the client-side search.
    pub search_name: String,
    pub price: String,
    pub stock_label: String,
    pub stock_urgent: bool,
    pub image_uri: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let stock = product.stock();
        Self {
            id: product.id,
            name: product.name.clone(),
            search_name: product.name.to_lowercase(),
            price: product.price.display(),
            stock_label: stock.label(),
            stock_urgent: stock.is_urgent(),
            image_uri: product.image_data_uri(),
        }
    }
}

/// Product detail display data for the overlay.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub size: String,
    pub premium: &'static str,
    pub description: String,
    pub image_uri: Option<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone().unwrap_or_default(),
            price: product.price.display(),
            size: product.size.clone().unwrap_or_default(),
            premium: if product.premium { "Yes" } else { "No" },
            description: product.description.clone().unwrap_or_default(),
            image_uri: product.image_data_uri(),
        }
    }
}

/// Detail overlay fragment template.
///
/// Without a product it renders the loading placeholder.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product_id: ProductId,
    pub product: Option<ProductDetailView>,
}

/// Display the detail overlay fragment.
///
/// A failed load is logged and renders the loading placeholder.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> impl IntoResponse {
    let product = match state.api().get_product(id).await {
        Ok(product) => Some(ProductDetailView::from(&product)),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching product details");
            None
        }
    };

    QuickViewTemplate {
        product_id: id,
        product,
    }
}
