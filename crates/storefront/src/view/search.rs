//! Client-side catalog search.

use crate::models::Product;

/// The current search text, stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Build a query from raw user input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(input.to_lowercase())
    }

    /// Replace the query text.
    pub fn set(&mut self, input: &str) {
        self.0 = input.to_lowercase();
    }

    /// The lower-cased query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `product`'s name contains the query, ignoring case.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty() || product.name.to_lowercase().contains(&self.0)
    }
}

/// Products whose name contains `query`, ignoring case, in catalog order.
///
/// An empty query returns the whole catalog.
#[must_use]
pub fn filter_products<'a>(catalog: &'a [Product], query: &SearchQuery) -> Vec<&'a Product> {
    catalog.iter().filter(|p| query.matches(p)).collect()
}
