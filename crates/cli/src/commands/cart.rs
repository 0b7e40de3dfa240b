//! Cart commands.
//!
//! Each invocation loads the catalog and the authoritative cart first, so
//! mutations validate against fresh state.

use qkart_core::ProductId;
use qkart_storefront::app::StorefrontApp;
use qkart_storefront::views::CartView;

/// Show the reconciled cart and its order total.
pub async fn show(app: &mut StorefrontApp) {
    app.load().await;
    print_cart(app);
}

/// Add one unit of a product, with duplicate prevention.
pub async fn add(app: &mut StorefrontApp, product_id: &str) {
    app.load().await;
    app.add_to_cart(&ProductId::from(product_id)).await;
    print_cart(app);
}

/// Set the absolute quantity of a line item. Quantity 0 deletes it.
pub async fn set(app: &mut StorefrontApp, product_id: &str, qty: u32) {
    app.load().await;
    app.set_quantity(&ProductId::from(product_id), qty).await;
    print_cart(app);
}

#[allow(clippy::print_stdout)]
fn print_cart(app: &StorefrontApp) {
    if !app.is_authenticated() {
        return;
    }
    let view = CartView::from_line_items(app.cart(), false);
    if view.is_empty() {
        println!("Cart is empty. Add more items to the cart to checkout.");
        return;
    }
    for item in &view.items {
        println!("{}  {}  x{}  {}", item.id, item.name, item.qty, item.line_total);
    }
    println!("Order total: {}", view.order_total);
}
