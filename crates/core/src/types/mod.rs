//! Core types for the museum cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;

pub use cart::Cart;
pub use id::{ItemId, ItemIdError};
pub use line_item::{ItemCandidate, LineItem};
pub use price::{Money, Price, PriceError};
