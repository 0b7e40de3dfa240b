//! Display data for embedding UIs.
//!
//! Pure builders from app state to render-ready structs - the headless
//! remainder of the original presentational components. No I/O here.

use rust_decimal::Decimal;

use qkart_core::{CartLineItem, Product};

use crate::cart;
use crate::session::Session;

/// Format a cost for display (e.g., `$19.99`).
fn format_cost(amount: Decimal) -> String {
    format!("${amount:.2}")
}

// =============================================================================
// Header
// =============================================================================

/// Header display data: auth buttons for anonymous visitors, the profile
/// block for a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Username to show in the profile block, if logged in.
    pub username: Option<String>,
}

impl HeaderView {
    /// Build the header for the current session.
    #[must_use]
    pub fn for_session(session: Option<&Session>) -> Self {
        Self {
            username: session.map(|s| s.username.clone()),
        }
    }

    /// Whether the login/register buttons should show.
    #[must_use]
    pub const fn shows_auth_buttons(&self) -> bool {
        self.username.is_none()
    }
}

// =============================================================================
// Product Card
// =============================================================================

/// Product card display data for the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: String,
    /// Stars to fill, out of five.
    pub rating: u8,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            cost: format_cost(product.cost),
            rating: product.rating,
            image: product.image.clone(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub qty: u32,
    pub cost: String,
    pub line_total: String,
    pub image: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.product.id.to_string(),
            name: item.product.name.clone(),
            qty: item.qty,
            cost: format_cost(item.product.cost),
            line_total: format_cost(item.line_total()),
            image: item.product.image.clone(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub order_total: String,
    /// Read-only carts (the checkout summary) hide the quantity steppers.
    pub read_only: bool,
}

impl CartView {
    /// Build the cart view from reconciled line items.
    ///
    /// Zero-quantity lines are hidden from display; the order total still
    /// runs over all line items (a zero-qty line contributes nothing).
    #[must_use]
    pub fn from_line_items(items: &[CartLineItem], read_only: bool) -> Self {
        Self {
            items: items
                .iter()
                .filter(|item| item.qty > 0)
                .map(CartItemView::from)
                .collect(),
            order_total: format_cost(cart::total(items)),
            read_only,
        }
    }

    /// Whether to render the empty-cart placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
