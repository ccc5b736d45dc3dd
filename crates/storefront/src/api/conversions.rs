//! Conversions from wire records into domain models.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use clotho_core::Price;

use super::types::ProductRecord;
use crate::models::{Product, ProductImage};

/// MIME type assumed when the backend sends image bytes without one.
const FALLBACK_IMAGE_TYPE: &str = "application/octet-stream";

/// Convert a wire record into a [`Product`].
///
/// A malformed image payload drops the image rather than the product.
pub fn convert_product(record: ProductRecord) -> Product {
    let image = convert_image(record.id, record.img, record.img_type);

    Product {
        id: record.id,
        name: record.pname,
        price: Price::usd(record.price),
        category: record.category,
        size: record.psize,
        premium: record.premium.unwrap_or(false),
        description: record.description,
        quantity: clamp_quantity(record.qty),
        image,
    }
}

/// Negative stock reads as none; counts beyond `u32` saturate.
fn clamp_quantity(qty: i64) -> u32 {
    u32::try_from(qty).unwrap_or(if qty > 0 { u32::MAX } else { 0 })
}

fn convert_image(
    id: clotho_core::ProductId,
    payload: Option<String>,
    content_type: Option<String>,
) -> Option<ProductImage> {
    let payload = payload.filter(|p| !p.is_empty())?;

    match STANDARD.decode(payload.trim()) {
        Ok(bytes) => Some(ProductImage {
            content_type: content_type.unwrap_or_else(|| FALLBACK_IMAGE_TYPE.to_string()),
            bytes,
        }),
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "Discarding undecodable product image");
            None
        }
    }
}
