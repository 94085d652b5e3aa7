//! Cart session: UI events in, new cart state out.
//!
//! A session owns the store handle, the pricing configuration and the
//! membership toggle. It keeps no copy of the cart; every call loads the
//! persisted record, so two sessions over the same storage always agree
//! after either one mutates it.
//!
//! | UI event            | Method                         |
//! |---------------------|--------------------------------|
//! | item selected       | [`CartSession::select_item`]   |
//! | remove              | [`CartSession::remove_one`]    |
//! | clear               | [`CartSession::clear_all`]     |
//! | membership toggled  | [`CartSession::set_member`]    |
//!
//! Mutations return the new [`Cart`]; re-rendering with
//! [`CartSession::view`] is left to the caller.

use museum_cart_core::{Cart, ItemCandidate, ItemId, Price};
use tracing::instrument;

use crate::error::Result;
use crate::pricing::{DiscountDecider, PricingConfig};
use crate::store::{CartStore, RecordStorage};
use crate::view::{self, Badge, CartView};

/// Event handlers for one page's cart.
#[derive(Debug)]
pub struct CartSession<S> {
    store: CartStore<S>,
    pricing: PricingConfig,
    is_member: bool,
}

impl<S: RecordStorage> CartSession<S> {
    /// Start a session. Membership starts off; it is never persisted.
    pub const fn new(store: CartStore<S>, pricing: PricingConfig) -> Self {
        Self {
            store,
            pricing,
            is_member: false,
        }
    }

    /// Handle "item selected" from raw catalog fields.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidItemId` or `CartError::InvalidPrice` if the
    /// fields do not validate, before the cart is touched, and
    /// `CartError::Store` if the new cart cannot be saved.
    pub fn select_item(
        &self,
        id: &str,
        name: &str,
        price: &str,
        image: Option<&str>,
    ) -> Result<Cart> {
        let mut candidate = ItemCandidate::new(ItemId::parse(id)?, name, Price::parse(price)?);
        candidate.image = image.filter(|s| !s.is_empty()).map(str::to_owned);
        self.add_one(candidate)
    }

    /// Add one unit of an already validated item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Store` if the new cart cannot be saved.
    #[instrument(skip(self, candidate), fields(id = %candidate.id))]
    pub fn add_one(&self, candidate: ItemCandidate) -> Result<Cart> {
        let id = candidate.id.clone();
        let cart = self.store.load().add_one(candidate);
        self.store.save(&cart)?;

        if let Some(line) = cart.get(&id) {
            tracing::info!(quantity = line.quantity, "Added to cart: {}", line.name);
        }
        Ok(cart)
    }

    /// Remove one unit of `id`; unknown ids leave the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Store` if the new cart cannot be saved.
    #[instrument(skip(self, id), fields(id = %id))]
    pub fn remove_one(&self, id: &ItemId) -> Result<Cart> {
        let cart = self.store.load().remove_one(id);
        self.store.save(&cart)?;
        tracing::debug!(quantity = cart.quantity_of(id), "Removed from cart");
        Ok(cart)
    }

    /// Empty the cart, delete the persisted record and turn membership off.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Store` if the record cannot be deleted.
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) -> Result<Cart> {
        self.is_member = false;
        self.store.clear()?;
        tracing::info!("Cleared cart");
        Ok(Cart::new())
    }

    /// Handle the membership toggle. The cart is not touched.
    pub fn set_member(&mut self, is_member: bool) {
        self.is_member = is_member;
    }

    #[must_use]
    pub const fn is_member(&self) -> bool {
        self.is_member
    }

    /// The current persisted cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Project the persisted cart for display, asking `decider` if both
    /// discounts qualify.
    pub fn view(&self, decider: &mut impl DiscountDecider) -> CartView {
        view::project(&self.store.load(), self.is_member, &self.pricing, decider)
    }

    /// Quantity badges for catalog entries, from the persisted cart.
    pub fn badges<'a>(&self, ids: impl IntoIterator<Item = &'a ItemId>) -> Vec<Badge> {
        view::badges(&self.store.load(), ids)
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }
}
