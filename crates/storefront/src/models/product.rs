//! Product model and derived display values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use clotho_core::{Price, ProductId};

/// Quantity above which the plain stock count is shown.
const PLAIN_STOCK_THRESHOLD: u32 = 5;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Backend product ID, unique within a catalog snapshot.
    pub id: ProductId,
    /// Display name (searched by the storefront filter).
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Category label.
    pub category: Option<String>,
    /// Size label (e.g. "M", "42").
    pub size: Option<String>,
    /// Whether the product belongs to the premium line.
    pub premium: bool,
    /// Long description.
    pub description: Option<String>,
    /// Units available.
    pub quantity: u32,
    /// Inline image payload.
    pub image: Option<ProductImage>,
}

impl Product {
    /// Stock display variant for this product's quantity.
    #[must_use]
    pub const fn stock(&self) -> StockDisplay {
        StockDisplay::for_quantity(self.quantity)
    }

    /// Image as a `data:` URI, if the product carries one.
    #[must_use]
    pub fn image_data_uri(&self) -> Option<String> {
        self.image.as_ref().map(ProductImage::data_uri)
    }
}

/// Raw image bytes with their MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ProductImage {
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Decoded image bytes.
    pub bytes: Vec<u8>,
}

impl ProductImage {
    /// Encode as `data:<mime>;base64,<payload>` for inline rendering.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

// Image payloads can be large; keep them out of logs.
impl std::fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// How a product's remaining stock is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDisplay {
    /// More than five units: show the count.
    InStock(u32),
    /// Two to five units.
    Limited,
    /// One unit (or none reported).
    LastOne,
}

impl StockDisplay {
    /// Pick the display variant for a quantity.
    #[must_use]
    pub const fn for_quantity(quantity: u32) -> Self {
        if quantity > PLAIN_STOCK_THRESHOLD {
            Self::InStock(quantity)
        } else if quantity > 1 {
            Self::Limited
        } else {
            Self::LastOne
        }
    }

    /// Text shown on the product card.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::InStock(quantity) => format!("Qty: {quantity}"),
            Self::Limited => "Hurry! Limited stock left".to_string(),
            Self::LastOne => "Hurry! Only 1 item left".to_string(),
        }
    }

    /// Whether the label should be highlighted.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        !matches!(self, Self::InStock(_))
    }
}
