//! Cart reconciliation.
//!
//! The server owns the cart as sparse `(productId, qty)` entries; display
//! needs full product data. Reconciliation joins the entries against the
//! current catalog snapshot to produce line items, and is rerun from
//! scratch whenever either side changes.

use rust_decimal::Decimal;

use qkart_core::{CartEntry, CartLineItem, Product, ProductId};

/// Join cart entries against a catalog snapshot into display line items.
///
/// - Each entry resolves to the catalog product with a matching ID; if no
///   product matches, the entry is dropped silently.
/// - Output order follows `entries`, not the catalog.
/// - Input entries are not deduplicated: two entries sharing a product ID
///   produce two line items. The backend is expected not to emit
///   duplicates; the client mirrors whatever arrives.
#[must_use]
pub fn reconcile(entries: &[CartEntry], catalog: &[Product]) -> Vec<CartLineItem> {
    entries
        .iter()
        .filter_map(|entry| {
            catalog
                .iter()
                .find(|product| product.id == entry.product_id)
                .map(|product| CartLineItem {
                    product: product.clone(),
                    qty: entry.qty,
                })
        })
        .collect()
}

/// Total value of all line items: Σ qty × cost. Zero for an empty cart.
#[must_use]
pub fn total(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
}

/// Whether a product is already present in the cart mirror.
#[must_use]
pub fn is_item_in_cart(items: &[CartLineItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| &item.product.id == product_id)
}

/// Phase a cart mutation attempt ended in.
///
/// Each attempt moves `Idle → Validating → InFlight → Reconciled | Failed`;
/// the terminal phase is reported on the outcome so embedders can observe
/// where an attempt stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    /// No attempt in progress.
    Idle,
    /// Client-side checks running; no network traffic yet.
    Validating,
    /// Request sent, awaiting the authoritative cart.
    InFlight,
    /// Server cart received and folded into the mirror.
    Reconciled,
    /// Attempt ended without touching the mirror (validation rejection or
    /// server failure).
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cost: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            category: "Misc".to_string(),
            cost: Decimal::from(cost),
            rating: 4,
            image: "https://i.imgur.com/lulqWzW.jpg".to_string(),
        }
    }

    fn entry(id: &str, qty: u32) -> CartEntry {
        CartEntry {
            product_id: ProductId::from(id),
            qty,
        }
    }

    #[test]
    fn test_reconcile_empty_cart() {
        let catalog = vec![product("A", 10), product("B", 20)];
        assert!(reconcile(&[], &catalog).is_empty());
    }

    #[test]
    fn test_reconcile_joins_by_id_in_entry_order() {
        let catalog = vec![product("B", 20), product("A", 10)];
        let entries = vec![entry("A", 2), entry("B", 1)];

        let items = reconcile(&entries, &catalog);
        assert_eq!(items.len(), 2);
        // Output follows entry order even though the catalog lists B first
        assert_eq!(items[0].product.id, ProductId::from("A"));
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].product.id, ProductId::from("B"));
        assert_eq!(items[1].qty, 1);

        assert_eq!(total(&items), Decimal::from(40_u32));
    }

    #[test]
    fn test_reconcile_drops_unknown_products_silently() {
        let catalog = vec![product("A", 10)];
        let entries = vec![entry("A", 1), entry("GONE", 3)];

        let items = reconcile(&entries, &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, ProductId::from("A"));
    }

    #[test]
    fn test_reconcile_length_bound() {
        let catalog = vec![product("A", 10), product("B", 20)];
        let all_known = vec![entry("A", 1), entry("B", 2)];
        let some_unknown = vec![entry("A", 1), entry("X", 2)];

        // Equals entries.len() iff every entry id is present in the catalog
        assert_eq!(reconcile(&all_known, &catalog).len(), all_known.len());
        assert!(reconcile(&some_unknown, &catalog).len() < some_unknown.len());
    }

    #[test]
    fn test_total_invariant_under_catalog_reordering() {
        let entries = vec![entry("A", 2), entry("B", 1), entry("C", 5)];
        let forward = vec![product("A", 10), product("B", 20), product("C", 3)];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(
            total(&reconcile(&entries, &forward)),
            total(&reconcile(&entries, &reversed))
        );
    }

    #[test]
    fn test_reconcile_preserves_duplicate_entries() {
        // Observed backend quirk: duplicate entries are not collapsed
        let catalog = vec![product("A", 10)];
        let entries = vec![entry("A", 1), entry("A", 4)];

        let items = reconcile(&entries, &catalog);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].qty, 1);
        assert_eq!(items[1].qty, 4);
        assert_eq!(total(&items), Decimal::from(50_u32));
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_is_item_in_cart() {
        let catalog = vec![product("A", 10)];
        let items = reconcile(&[entry("A", 1)], &catalog);

        assert!(is_item_in_cart(&items, &ProductId::from("A")));
        assert!(!is_item_in_cart(&items, &ProductId::from("B")));
    }
}
