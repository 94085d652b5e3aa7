//! Museum Cart - client-side shopping cart engine.
//!
//! Turns a persisted line-item collection into a deterministic invoice and
//! keeps every on-page quantity badge consistent with the persisted state.
//!
//! # Architecture
//!
//! - [`store`] - durable key-value persistence of the cart (fail-soft loads)
//! - [`pricing`] - volume tiers, discount arbitration, tax and shipping
//! - [`view`] - pure projection of cart state into display rows and badges
//! - [`session`] - wires UI events to the store; owns the membership flag
//! - [`config`] - pricing constants and storage location from the environment
//!
//! Line-item operations themselves live in `museum-cart-core` on [`Cart`].
//!
//! # Control flow
//!
//! UI events mutate the store through [`CartSession`], which returns the new
//! [`Cart`]. The caller then asks the session for a [`view::CartView`];
//! projecting runs the pricing engine, which may stop to ask the caller to
//! pick between the member and the volume discount.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod pricing;
pub mod session;
pub mod store;
pub mod view;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use museum_cart_core::{Cart, ItemCandidate, ItemId, LineItem, Money, Price};
pub use pricing::{
    AppliedDiscount, DiscountChoice, DiscountDecider, DiscountOffer, EligibleCart, Invoice,
    PendingDecision, Pricing, PricingConfig, VolumeTier, VolumeTiers,
};
pub use session::CartSession;
pub use store::{CartStore, FileStorage, MemoryStorage, RecordStorage, StorageKey, StoreError};
pub use view::{Badge, CartRowView, CartView, InvoiceView};
