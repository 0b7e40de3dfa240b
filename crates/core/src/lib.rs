//! QKart Core - Shared types library.
//!
//! This crate provides common types used across all QKart components:
//! - `storefront` - Headless storefront client library
//! - `cli` - Command-line storefront driver
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog products, cart entries, and type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
