//! Clotho Core - Shared types library.
//!
//! This crate provides common types used by the Clotho components:
//! - `storefront` - Public-facing catalog, wishlist and cart view
//! - `integration-tests` - End-to-end tests against a fake backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and severities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
