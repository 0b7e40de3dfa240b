//! Core types for QKart.
//!
//! This module provides the catalog and cart data model shared by the
//! storefront library and the CLI.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{CartEntry, CartLineItem};
pub use id::ProductId;
pub use product::Product;
