//! Line items and add-to-cart candidates.

use serde::{Deserialize, Serialize};

use super::{ItemId, Money, Price};

/// The fields a catalog entry supplies when it is added to the cart.
///
/// The price is already parsed; non-numeric input is rejected by
/// [`Price::parse`] before a candidate can exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCandidate {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    pub image: Option<String>,
}

impl ItemCandidate {
    /// Create a candidate without an image.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One catalog product in the cart, with its selected quantity.
///
/// Field names on the wire match the shop page's stored record:
/// `{"id", "name", "price", "image", "qty"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1 from a candidate.
    #[must_use]
    pub fn from_candidate(candidate: ItemCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image: candidate.image,
            quantity: 1,
        }
    }

    /// Rebuild the candidate this line was created from.
    ///
    /// Used by the cart view's per-row "Add" action.
    #[must_use]
    pub fn to_candidate(&self) -> ItemCandidate {
        ItemCandidate {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            image: self.image.clone(),
        }
    }

    /// `quantity × unit_price`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Money {
        Money::from(self.unit_price) * rust_decimal::Decimal::from(self.quantity)
    }

    /// Whether this line takes part in pricing.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.quantity > 0 && self.unit_price.is_positive()
    }
}
