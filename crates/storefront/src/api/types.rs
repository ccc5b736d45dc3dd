//! Wire types for the backend REST API.
//!
//! Field names mirror the backend JSON exactly; conversion into
//! [`crate::models::Product`] happens in the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clotho_core::{ProductId, UserId};

/// Product record as served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub pname: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub psize: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    pub qty: i64,
    /// Base64-encoded image bytes.
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default, rename = "imgType")]
    pub img_type: Option<String>,
}

/// The listing endpoint answers either with a bare array or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductListPayload {
    Bare(Vec<ProductRecord>),
    Envelope { data: Vec<ProductRecord> },
}

impl ProductListPayload {
    /// Unwrap into the list of records.
    #[must_use]
    pub fn into_records(self) -> Vec<ProductRecord> {
        match self {
            Self::Bare(records) | Self::Envelope { data: records } => records,
        }
    }
}

/// Body of the add-to-cart request.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
}
