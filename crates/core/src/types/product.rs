//! Catalog product entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A read-only catalog entry, sourced from the backend.
///
/// The catalog is owned by the backend; the client treats each fetched list
/// as an immutable snapshot.
///
/// # Wire format
///
/// ```json
/// {
///     "name": "iPhone XR",
///     "category": "Phones",
///     "cost": 100,
///     "rating": 4,
///     "image": "https://i.imgur.com/lulqWzW.jpg",
///     "_id": "v4sLtEcMpzabRyfx"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-issued unique ID (`_id` on the wire).
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name of the product.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// Price in the store currency's standard unit.
    pub cost: Decimal,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    /// URL of the product image.
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::from("v4sLtEcMpzabRyfx"));
        assert_eq!(product.name, "iPhone XR");
        assert_eq!(product.category, "Phones");
        assert_eq!(product.cost, Decimal::from(100_u32));
        assert_eq!(product.rating, 4);

        // `id` must round-trip back to `_id`
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], "v4sLtEcMpzabRyfx");
        assert!(value.get("id").is_none());
    }
}
