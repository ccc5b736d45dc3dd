//! Home page route handler: the catalog grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use super::products::ProductCardView;
use crate::filters;
use crate::services::ProductService;
use crate::state::AppState;
use crate::view::{SearchQuery, filter_products};

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub query: String,
}

/// Display the catalog, filtered by `?q=`.
///
/// A failed catalog load is logged and renders an empty grid.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let catalog = match state.api().list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching products");
            Vec::new()
        }
    };

    let query = SearchQuery::new(params.q.as_deref().unwrap_or_default());
    let products = filter_products(&catalog, &query)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        products,
        query: query.as_str().to_string(),
    }
}
