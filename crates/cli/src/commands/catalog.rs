//! Catalog listing and live search.

use tokio::io::{AsyncBufReadExt, BufReader};

use qkart_storefront::app::StorefrontApp;
use qkart_storefront::views::ProductCardView;

/// List the catalog, optionally filtered by a search term.
pub async fn products(app: &mut StorefrontApp, search: Option<String>) {
    match search {
        Some(term) => app.search_fired(&term).await,
        None => app.load().await,
    }
    print_catalog(app);
}

/// Live debounced search: each stdin line is a "keystroke", and a search
/// fires only after the quiet period with no further input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn watch(app: &mut StorefrontApp) -> Result<(), std::io::Error> {
    let mut queries = match app.take_search_events() {
        Some(rx) => rx,
        None => return Ok(()),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => app.search_input(text.trim()),
                None => break,
            },
            Some(query) = queries.recv() => {
                app.search_fired(&query).await;
                print_catalog(app);
            }
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_catalog(app: &StorefrontApp) {
    if app.catalog().is_empty() {
        println!("No products found");
        return;
    }
    for product in app.catalog() {
        let card = ProductCardView::from(product);
        println!(
            "{}  {}  {}  {}  ({}/5)",
            card.id, card.name, card.category, card.cost, card.rating
        );
    }
}
