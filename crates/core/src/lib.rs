//! Museum Cart Core - Shared types library.
//!
//! This crate provides the types used across all museum cart components:
//! - `museum-cart` - Cart store, pricing engine and view projection
//! - `museum-cart-cli` - Terminal front end for the shop cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! persistence, no logging. Every cart mutation takes a [`Cart`] by value and
//! returns the new one, so callers decide when to persist and re-render.
//!
//! # Modules
//!
//! - [`types`] - Catalog IDs, prices, money amounts, line items and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
