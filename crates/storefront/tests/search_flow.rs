//! Debounced search against a mock backend.

use std::sync::Arc;

use mockito::{Matcher, Server};

use qkart_storefront::app::StorefrontApp;
use qkart_storefront::config::StorefrontConfig;
use qkart_storefront::notify::{MemoryNotifier, Severity};
use qkart_storefront::session::MemorySessionStore;

#[tokio::test]
async fn rapid_keystrokes_issue_exactly_one_request_with_final_text() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/products/search")
        .match_query(Matcher::UrlEncoded("value".into(), "iphone".into()))
        .with_status(200)
        .with_body(
            r#"[{"name":"iPhone XR","category":"Phones","cost":100,"rating":4,
                 "image":"https://i.imgur.com/lulqWzW.jpg","_id":"v4sLtEcMpzabRyfx"}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = StorefrontConfig::for_endpoint(&server.url()).expect("endpoint");
    let notifier = Arc::new(MemoryNotifier::new());
    let mut app = StorefrontApp::new(
        &config,
        Box::new(MemorySessionStore::new()),
        notifier.clone(),
    )
    .expect("app");
    let mut queries = app.take_search_events().expect("first take");

    // A burst of keystrokes inside the quiet window
    app.search_input("i");
    app.search_input("ip");
    app.search_input("iphone");

    // Only the final keystroke's query ever fires
    let fired = queries.recv().await.expect("one query fires");
    assert_eq!(fired, "iphone");
    app.search_fired(&fired).await;

    assert_eq!(app.catalog().len(), 1);
    assert_eq!(app.catalog()[0].name, "iPhone XR");
    assert!(queries.try_recv().is_err());
    assert!(notifier.pop().is_none());
    search.assert_async().await;
}

#[tokio::test]
async fn search_with_no_matches_yields_empty_catalog_without_error() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/products/search")
        .match_query(Matcher::UrlEncoded("value".into(), "nothing".into()))
        .with_status(404)
        .with_body(r#"{"success":false,"message":"No products found"}"#)
        .create_async()
        .await;

    let config = StorefrontConfig::for_endpoint(&server.url()).expect("endpoint");
    let notifier = Arc::new(MemoryNotifier::new());
    let mut app = StorefrontApp::new(
        &config,
        Box::new(MemorySessionStore::new()),
        notifier.clone(),
    )
    .expect("app");

    app.search_fired("nothing").await;
    assert!(app.catalog().is_empty());
    assert!(notifier.pop().is_none());
}

#[tokio::test]
async fn search_server_failure_surfaces_error_and_empties_catalog() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/products/search")
        .match_query(Matcher::UrlEncoded("value".into(), "anything".into()))
        .with_status(500)
        .with_body(r#"{"success":false,"message":"Something went wrong"}"#)
        .create_async()
        .await;

    let config = StorefrontConfig::for_endpoint(&server.url()).expect("endpoint");
    let notifier = Arc::new(MemoryNotifier::new());
    let mut app = StorefrontApp::new(
        &config,
        Box::new(MemorySessionStore::new()),
        notifier.clone(),
    )
    .expect("app");

    app.search_fired("anything").await;
    assert!(app.catalog().is_empty());

    let note = notifier.pop().expect("error queued");
    assert_eq!(note.severity, Severity::Error);
    assert_eq!(note.message, "Something went wrong");
}

#[tokio::test]
async fn search_events_can_only_be_taken_once() {
    let server = Server::new_async().await;
    let config = StorefrontConfig::for_endpoint(&server.url()).expect("endpoint");
    let mut app = StorefrontApp::new(
        &config,
        Box::new(MemorySessionStore::new()),
        Arc::new(MemoryNotifier::new()),
    )
    .expect("app");

    assert!(app.take_search_events().is_some());
    assert!(app.take_search_events().is_none());
}
