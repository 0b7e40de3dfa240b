//! Cart entries and derived line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// One entry of the authoritative server-side cart.
///
/// The backend guarantees at most one entry per product ID; the client does
/// not enforce that and mirrors whatever the server returns.
///
/// # Wire format
///
/// ```json
/// { "productId": "KCRwjF7lN97HnEaY", "qty": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// ID of the product this entry refers to.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Quantity in the cart. Zero requests deletion server-side.
    pub qty: u32,
}

/// A cart entry merged with its catalog product for display.
///
/// Derived, never stored: recomputed whenever the catalog snapshot or the
/// server cart changes. Entries whose product ID is absent from the catalog
/// snapshot never become line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    /// Catalog product the entry resolved to.
    pub product: Product,
    /// Quantity carried over from the cart entry.
    pub qty: u32,
}

impl CartLineItem {
    /// The line's contribution to the order total.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.cost * Decimal::from(self.qty)
    }
}
