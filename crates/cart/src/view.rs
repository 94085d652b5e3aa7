//! View projection: cart state to display data.
//!
//! Everything here is a pure function of a [`Cart`] and the membership flag.
//! Badge text for catalog entries elsewhere on the page is derived from the
//! same cart the caller just loaded from the store, never from a copy kept
//! around between events.

use museum_cart_core::{Cart, ItemId, LineItem};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::{
    AppliedDiscount, DiscountDecider, EligibleCart, Invoice, PricingConfig, price_with,
};

/// One cart line, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRowView {
    pub id: ItemId,
    pub quantity: u32,
    pub name: String,
    pub line_total: String,
    pub image: Option<String>,
}

impl CartRowView {
    /// Row text, e.g. `2 × Gallery Poster — $60.00`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} × {} — {}", self.quantity, self.name, self.line_total)
    }
}

impl From<&LineItem> for CartRowView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.clone(),
            quantity: line.quantity,
            name: line.name.clone(),
            line_total: line.line_total().to_string(),
            image: line.image.clone(),
        }
    }
}

/// Invoice figures formatted as currency.
///
/// Discounts are shown as deductions, so a `$3.50` volume discount reads
/// `($3.50)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    pub item_subtotal: String,
    pub volume_discount: String,
    pub member_discount: String,
    pub shipping: String,
    pub taxable_subtotal: String,
    pub tax_rate: String,
    pub tax_amount: String,
    pub total: String,
    pub applied: AppliedDiscount,
}

impl InvoiceView {
    const LABEL_WIDTH: usize = 21;

    /// The aligned plain-text invoice block shown under the cart rows.
    #[must_use]
    pub fn summary_text(&self) -> String {
        [
            ("Subtotal of Items:", &self.item_subtotal),
            ("Volume Discount:", &self.volume_discount),
            ("Member Discount:", &self.member_discount),
            ("Shipping:", &self.shipping),
            ("Subtotal (Taxable):", &self.taxable_subtotal),
            ("Tax Rate:", &self.tax_rate),
            ("Tax Amount:", &self.tax_amount),
            ("Invoice Total:", &self.total),
        ]
        .iter()
        .map(|(label, value)| format!("{label:<width$}{value}\n", width = Self::LABEL_WIDTH))
        .collect()
    }
}

impl From<&Invoice> for InvoiceView {
    fn from(invoice: &Invoice) -> Self {
        Self {
            item_subtotal: invoice.item_subtotal.to_string(),
            volume_discount: (-invoice.volume_discount).to_string(),
            member_discount: (-invoice.member_discount).to_string(),
            shipping: invoice.shipping.to_string(),
            taxable_subtotal: invoice.taxable_subtotal.to_string(),
            tax_rate: format_percent(invoice.tax_rate),
            tax_amount: invoice.tax_amount.to_string(),
            total: invoice.total.to_string(),
            applied: invoice.applied,
        }
    }
}

/// What the cart panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartView {
    /// Nothing eligible to price; no invoice is produced.
    Empty { message: String },
    /// Eligible lines and their invoice.
    Filled {
        rows: Vec<CartRowView>,
        summary: InvoiceView,
    },
}

impl CartView {
    pub const EMPTY_MESSAGE: &'static str = "Your cart is empty.";

    /// The empty-cart state.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty {
            message: Self::EMPTY_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Project a cart into its display model.
///
/// Only eligible lines are shown. When none remain the pricing engine is not
/// run and the empty state is returned.
pub fn project(
    cart: &Cart,
    is_member: bool,
    config: &PricingConfig,
    decider: &mut impl DiscountDecider,
) -> CartView {
    let Some(eligible) = EligibleCart::new(cart) else {
        return CartView::empty();
    };

    let invoice = price_with(&eligible, is_member, config, decider);
    CartView::Filled {
        rows: eligible.items().iter().map(|line| CartRowView::from(*line)).collect(),
        summary: InvoiceView::from(&invoice),
    }
}

/// Quantity badge for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: ItemId,
    /// `Qty: n`, or `None` when the item is not in the cart.
    pub text: Option<String>,
}

impl Badge {
    /// Badge text, empty when the item is not in the cart.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Badge text for `id`: `Qty: n` when in the cart, otherwise `None`.
#[must_use]
pub fn badge_text(cart: &Cart, id: &ItemId) -> Option<String> {
    match cart.quantity_of(id) {
        0 => None,
        qty => Some(format!("Qty: {qty}")),
    }
}

/// Badges for every catalog entry in `ids`, in the given order.
pub fn badges<'a>(cart: &Cart, ids: impl IntoIterator<Item = &'a ItemId>) -> Vec<Badge> {
    ids.into_iter()
        .map(|id| Badge {
            id: id.clone(),
            text: badge_text(cart, id),
        })
        .collect()
}

/// Format a rate fraction as a percentage with one decimal, e.g. `10.2%`.
fn format_percent(rate: Decimal) -> String {
    let mut percent = (rate * Decimal::ONE_HUNDRED).round_dp(1);
    percent.rescale(1);
    format!("{percent}%")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use museum_cart_core::{ItemCandidate, Price};

    use super::*;
    use crate::pricing::{DiscountChoice, DiscountOffer, always};

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    fn add(cart: Cart, item: &str, name: &str, price: &str) -> Cart {
        cart.add_one(ItemCandidate::new(id(item), name, Price::parse(price).unwrap()))
    }

    fn sample_cart() -> Cart {
        let cart = add(Cart::new(), "poster", "Gallery Poster", "30");
        let cart = add(cart, "poster", "Gallery Poster", "30");
        add(cart, "pin", "Enamel Pin", "10")
    }

    #[test]
    fn test_project_end_to_end() {
        let view = project(
            &sample_cart(),
            false,
            &PricingConfig::default(),
            &mut always(None),
        );
        let CartView::Filled { rows, summary } = view else {
            panic!("expected a filled cart");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label(), "2 × Gallery Poster — $60.00");
        assert_eq!(rows[1].label(), "1 × Enamel Pin — $10.00");

        assert_eq!(summary.item_subtotal, "$70.00");
        assert_eq!(summary.volume_discount, "($3.50)");
        assert_eq!(summary.member_discount, "$0.00");
        assert_eq!(summary.shipping, "$25.00");
        assert_eq!(summary.taxable_subtotal, "$91.50");
        assert_eq!(summary.tax_rate, "10.2%");
        assert_eq!(summary.tax_amount, "$9.33");
        assert_eq!(summary.total, "$100.83");
        assert_eq!(summary.applied, AppliedDiscount::Volume);
    }

    #[test]
    fn test_project_empty_cart() {
        let mut asked = false;
        let mut decider = |_: &DiscountOffer| {
            asked = true;
            None
        };
        let view = project(&Cart::new(), true, &PricingConfig::default(), &mut decider);
        assert_eq!(view, CartView::empty());
        assert!(!asked);
    }

    #[test]
    fn test_project_only_ineligible_lines_is_empty() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":"a","name":"A","price":0,"qty":3},{"id":"b","name":"B","price":4,"qty":0}]"#,
        )
        .unwrap();
        let view = project(&cart, false, &PricingConfig::default(), &mut always(None));
        assert!(view.is_empty());
    }

    #[test]
    fn test_project_member_choice() {
        let cart = add(Cart::new(), "bowl", "Bowl", "60");
        let view = project(
            &cart,
            true,
            &PricingConfig::default(),
            &mut always(Some(DiscountChoice::Member)),
        );
        let CartView::Filled { summary, .. } = view else {
            panic!("expected a filled cart");
        };
        assert_eq!(summary.member_discount, "($9.00)");
        assert_eq!(summary.volume_discount, "$0.00");
        assert_eq!(summary.applied, AppliedDiscount::Member);
    }

    #[test]
    fn test_summary_text_layout() {
        let view = project(
            &sample_cart(),
            false,
            &PricingConfig::default(),
            &mut always(None),
        );
        let CartView::Filled { summary, .. } = view else {
            panic!("expected a filled cart");
        };
        let text = summary.summary_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Subtotal of Items:   $70.00");
        assert_eq!(lines[1], "Volume Discount:     ($3.50)");
        assert_eq!(lines[5], "Tax Rate:            10.2%");
        assert_eq!(lines[7], "Invoice Total:       $100.83");
    }

    #[test]
    fn test_badge_text() {
        let cart = sample_cart();
        assert_eq!(badge_text(&cart, &id("poster")).as_deref(), Some("Qty: 2"));
        assert_eq!(badge_text(&cart, &id("pin")).as_deref(), Some("Qty: 1"));
        assert_eq!(badge_text(&cart, &id("mug")), None);
    }

    #[test]
    fn test_badges_follow_catalog_order() {
        let cart = sample_cart();
        let catalog = [id("mug"), id("pin"), id("poster")];
        let badges = badges(&cart, &catalog);

        let texts: Vec<&str> = badges.iter().map(Badge::display_text).collect();
        assert_eq!(texts, ["", "Qty: 1", "Qty: 2"]);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent("0.102".parse().unwrap()), "10.2%");
        assert_eq!(format_percent("0.08".parse().unwrap()), "8.0%");
    }
}
