//! The cart: an ordered collection of line items keyed by [`ItemId`].
//!
//! All operations take the cart by value and return the new cart. Nothing
//! here persists or re-renders; the caller does both after a mutation.

use serde::{Deserialize, Serialize};

use super::{ItemCandidate, ItemId, LineItem};

/// Ordered line items, at most one per id.
///
/// Insertion order is kept for display only. Persisted carts that carry the
/// same id twice are merged on load into the first occurrence, adding up the
/// quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `candidate`.
    ///
    /// An existing line for the same id has its quantity bumped; its name,
    /// price and image are kept as first seen. Otherwise a new line with
    /// quantity 1 is appended.
    #[must_use]
    pub fn add_one(mut self, candidate: ItemCandidate) -> Self {
        match self.items.iter_mut().find(|line| line.id == candidate.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(LineItem::from_candidate(candidate)),
        }
        self
    }

    /// Remove one unit of `id`.
    ///
    /// A line at quantity 1 (or below) is deleted. An unknown id is a no-op.
    #[must_use]
    pub fn remove_one(mut self, id: &ItemId) -> Self {
        let Some(pos) = self.items.iter().position(|line| &line.id == id) else {
            return self;
        };
        match self.items.get_mut(pos) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.items.remove(pos);
            }
        }
        self
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Quantity of `id` in the cart, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ItemId) -> u32 {
        self.get(id).map_or(0, |line| line.quantity)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Lines that take part in pricing: positive quantity and price.
    pub fn eligible_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|line| line.is_eligible())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(lines: Vec<LineItem>) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(lines.len());
        for line in lines {
            match items.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => items.push(line),
            }
        }
        Self { items }
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
