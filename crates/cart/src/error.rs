//! Unified error handling for cart operations.
//!
//! Malformed persisted state and unknown ids are not errors here: the store
//! forgives the former and line-item operations ignore the latter. What
//! remains is input rejected at the boundary and storage that cannot be
//! written.

use museum_cart_core::{ItemIdError, PriceError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Persisting or clearing the cart failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A price from the catalog was not a valid amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// An item id from the catalog was empty.
    #[error("Invalid item id: {0}")]
    InvalidItemId(#[from] ItemIdError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
