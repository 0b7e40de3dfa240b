//! QKart headless storefront client library.
//!
//! Everything the QKart browser UI did - product listing and search, the
//! server-authoritative cart with a local mirror, login/registration, and a
//! persisted session - re-expressed as explicit state transitions on
//! [`app::StorefrontApp`], independent of any rendering layer.
//!
//! # Architecture
//!
//! - The backend owns the catalog and the cart; the client only mirrors
//!   them. Cart mutations post to the server and fold the authoritative
//!   response back via [`cart::reconcile`] - never an optimistic merge.
//! - Discrete events (load catalog, search input, timer fired, mutation
//!   requested, login/logout) drive the app; each handler runs its server
//!   round trip to completion before touching local state.
//! - User-visible outcomes flow through the [`notify::Notifier`] seam, the
//!   headless analog of the UI's snackbar queue.
//!
//! # Example
//!
//! ```rust,ignore
//! use qkart_storefront::app::StorefrontApp;
//! use qkart_storefront::config::StorefrontConfig;
//!
//! let config = StorefrontConfig::from_env()?;
//! let mut app = StorefrontApp::from_config(&config)?;
//! app.load().await;
//! app.add_to_cart(&product_id).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod auth;
pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod search;
pub mod session;
pub mod views;
