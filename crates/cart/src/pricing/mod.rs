//! Pricing engine: cart in, invoice out.
//!
//! The math is pure. The one place the engine needs outside input, picking
//! between the member and the volume discount, is surfaced as
//! [`Pricing::NeedsDecision`] rather than a callback buried in the
//! arithmetic. [`price_with`] drives that state machine with a
//! [`DiscountDecider`] for callers that can answer synchronously.
//!
//! # Algorithm
//!
//! 1. `item_subtotal = Σ quantity × unit_price` over eligible lines
//! 2. volume discount = `item_subtotal × tier rate`
//! 3. member discount = `item_subtotal × member rate` when a member
//! 4. at most one discount applies; both positive means the shopper chooses
//! 5. `taxable = item_subtotal − discount + shipping`
//! 6. `tax = taxable × tax rate`
//! 7. `total = taxable + tax`
//!
//! Nothing is rounded here and negative figures are not clamped.

mod decision;
mod tiers;

use museum_cart_core::{Cart, LineItem, Money};
use rust_decimal::Decimal;
use serde::Serialize;

pub use decision::{
    AppliedDiscount, DiscountChoice, DiscountDecider, DiscountOffer, always,
};
pub use tiers::{VolumeTier, VolumeTiers};

/// Rates and fees the engine prices with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Sales tax as a fraction (0.102 = 10.2%).
    pub tax_rate: Decimal,
    /// Member discount as a fraction of the item subtotal.
    pub member_discount_rate: Decimal,
    /// Flat shipping fee added before tax.
    pub shipping_flat_rate: Money,
    /// Volume discount tiers on the item subtotal.
    pub tiers: VolumeTiers,
}

impl PricingConfig {
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(102, 0, 0, false, 3);
    pub const DEFAULT_MEMBER_DISCOUNT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
    pub const DEFAULT_SHIPPING_FLAT_RATE: Decimal = Decimal::from_parts(2500, 0, 0, false, 2);
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            member_discount_rate: Self::DEFAULT_MEMBER_DISCOUNT_RATE,
            shipping_flat_rate: Money::new(Self::DEFAULT_SHIPPING_FLAT_RATE),
            tiers: VolumeTiers::default(),
        }
    }
}

/// The non-empty set of cart lines that take part in pricing.
///
/// Lines with zero quantity or a non-positive price are left out silently.
/// A cart with nothing eligible has no `EligibleCart`, so the engine is never
/// asked to price it.
#[derive(Debug, Clone)]
pub struct EligibleCart<'a> {
    items: Vec<&'a LineItem>,
}

impl<'a> EligibleCart<'a> {
    /// Select the eligible lines of `cart`, or `None` if there are none.
    #[must_use]
    pub fn new(cart: &'a Cart) -> Option<Self> {
        let items: Vec<&LineItem> = cart.eligible_items().collect();
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Eligible lines in cart order.
    #[must_use]
    pub fn items(&self) -> &[&'a LineItem] {
        &self.items
    }

    /// `Σ quantity × unit_price`.
    #[must_use]
    pub fn item_subtotal(&self) -> Money {
        self.items.iter().map(|line| line.line_total()).sum()
    }
}

/// A priced cart.
///
/// Amounts keep full precision; format them with `Money`'s `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub item_subtotal: Money,
    /// Volume discount taken off, zero unless `applied` is `Volume`.
    pub volume_discount: Money,
    /// Member discount taken off, zero unless `applied` is `Member`.
    pub member_discount: Money,
    pub applied: AppliedDiscount,
    pub shipping: Money,
    pub taxable_subtotal: Money,
    pub tax_rate: Decimal,
    pub tax_amount: Money,
    pub total: Money,
}

impl Invoice {
    /// The single discount amount taken off the item subtotal.
    #[must_use]
    pub fn applied_discount(&self) -> Money {
        self.volume_discount + self.member_discount
    }
}

/// Outcome of pricing a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pricing {
    /// No choice was needed.
    Settled(Invoice),
    /// Both discounts qualify; the shopper must pick one.
    NeedsDecision(PendingDecision),
}

impl Pricing {
    /// Resolve a pending decision with `decider`, or return the settled invoice.
    pub fn settle_with(self, decider: &mut impl DiscountDecider) -> Invoice {
        match self {
            Self::Settled(invoice) => invoice,
            Self::NeedsDecision(pending) => {
                let choice = decider.decide(pending.offer());
                pending.resolve(choice)
            }
        }
    }
}

/// Pricing suspended on the member-versus-volume choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecision {
    item_subtotal: Money,
    offer: DiscountOffer,
    shipping: Money,
    tax_rate: Decimal,
}

impl PendingDecision {
    /// Both candidate discount amounts.
    #[must_use]
    pub const fn offer(&self) -> &DiscountOffer {
        &self.offer
    }

    /// Finish pricing with the shopper's choice; `None` applies no discount.
    #[must_use]
    pub fn resolve(self, choice: Option<DiscountChoice>) -> Invoice {
        let applied = choice.map_or(AppliedDiscount::None, AppliedDiscount::from);
        settle(
            self.item_subtotal,
            &self.offer,
            applied,
            self.shipping,
            self.tax_rate,
        )
    }
}

/// Price an eligible cart.
#[must_use]
pub fn price(cart: &EligibleCart<'_>, is_member: bool, config: &PricingConfig) -> Pricing {
    let item_subtotal = cart.item_subtotal();
    let volume_rate = config.tiers.rate_for(item_subtotal.amount());
    let offer = DiscountOffer {
        volume: item_subtotal * volume_rate,
        member: if is_member {
            item_subtotal * config.member_discount_rate
        } else {
            Money::ZERO
        },
    };

    let applied = match (offer.member.is_positive(), offer.volume.is_positive()) {
        (true, true) => {
            return Pricing::NeedsDecision(PendingDecision {
                item_subtotal,
                offer,
                shipping: config.shipping_flat_rate,
                tax_rate: config.tax_rate,
            });
        }
        (true, false) => AppliedDiscount::Member,
        (false, true) => AppliedDiscount::Volume,
        (false, false) => AppliedDiscount::None,
    };

    Pricing::Settled(settle(
        item_subtotal,
        &offer,
        applied,
        config.shipping_flat_rate,
        config.tax_rate,
    ))
}

/// Price an eligible cart, asking `decider` if both discounts qualify.
pub fn price_with(
    cart: &EligibleCart<'_>,
    is_member: bool,
    config: &PricingConfig,
    decider: &mut impl DiscountDecider,
) -> Invoice {
    price(cart, is_member, config).settle_with(decider)
}

fn settle(
    item_subtotal: Money,
    offer: &DiscountOffer,
    applied: AppliedDiscount,
    shipping: Money,
    tax_rate: Decimal,
) -> Invoice {
    let (volume_discount, member_discount) = match applied {
        AppliedDiscount::None => (Money::ZERO, Money::ZERO),
        AppliedDiscount::Volume => (offer.volume, Money::ZERO),
        AppliedDiscount::Member => (Money::ZERO, offer.member),
    };
    let taxable_subtotal = item_subtotal - volume_discount - member_discount + shipping;
    let tax_amount = taxable_subtotal * tax_rate;

    Invoice {
        item_subtotal,
        volume_discount,
        member_discount,
        applied,
        shipping,
        taxable_subtotal,
        tax_rate,
        tax_amount,
        total: taxable_subtotal + tax_amount,
    }
}
