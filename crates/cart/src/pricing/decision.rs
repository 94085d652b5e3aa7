//! Discount arbitration: at most one discount per invoice.
//!
//! When both the member and the volume discount are positive, the shopper
//! picks one. The engine does not decide on its own, even when one discount
//! is larger; a dismissed prompt applies neither.

use std::fmt;

use museum_cart_core::Money;
use serde::{Deserialize, Serialize};

/// The shopper's pick when both discounts qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountChoice {
    Member,
    Volume,
}

impl DiscountChoice {
    /// Read a prompt answer: `M` picks member, `V` picks volume.
    ///
    /// Case and surrounding whitespace are ignored. Anything else, including
    /// an empty answer, is a dismissal and yields `None`.
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Self::Member),
            "V" => Some(Self::Volume),
            _ => None,
        }
    }
}

/// Which discount ended up on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedDiscount {
    #[default]
    None,
    Volume,
    Member,
}

impl AppliedDiscount {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No discount",
            Self::Volume => "Volume discount",
            Self::Member => "Member discount",
        }
    }
}

impl From<DiscountChoice> for AppliedDiscount {
    fn from(choice: DiscountChoice) -> Self {
        match choice {
            DiscountChoice::Member => Self::Member,
            DiscountChoice::Volume => Self::Volume,
        }
    }
}

impl fmt::Display for AppliedDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Both candidate discounts, shown to the shopper when they must choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountOffer {
    pub member: Money,
    pub volume: Money,
}

impl DiscountOffer {
    /// Prompt text asking for a single discount.
    pub const PROMPT: &'static str =
        "Only one discount may be applied. Type 'M' for Member or 'V' for Volume:";
}

/// Supplies the shopper's answer when both discounts qualify.
///
/// Returning `None` means the prompt was dismissed; no discount is applied.
/// Closures of the right shape implement this trait.
pub trait DiscountDecider {
    fn decide(&mut self, offer: &DiscountOffer) -> Option<DiscountChoice>;
}

impl<F> DiscountDecider for F
where
    F: FnMut(&DiscountOffer) -> Option<DiscountChoice>,
{
    fn decide(&mut self, offer: &DiscountOffer) -> Option<DiscountChoice> {
        self(offer)
    }
}

/// A decider that always gives the same answer.
pub fn always(choice: Option<DiscountChoice>) -> impl DiscountDecider {
    move |_: &DiscountOffer| choice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_answer() {
        assert_eq!(DiscountChoice::from_answer("M"), Some(DiscountChoice::Member));
        assert_eq!(DiscountChoice::from_answer(" m\n"), Some(DiscountChoice::Member));
        assert_eq!(DiscountChoice::from_answer("v"), Some(DiscountChoice::Volume));
        assert_eq!(DiscountChoice::from_answer(""), None);
        assert_eq!(DiscountChoice::from_answer("member"), None);
    }

    #[test]
    fn test_closure_decider() {
        let offer = DiscountOffer {
            member: Money::ZERO,
            volume: Money::ZERO,
        };
        let mut asked = 0;
        let mut decider = |_: &DiscountOffer| {
            asked += 1;
            Some(DiscountChoice::Volume)
        };
        assert_eq!(decider.decide(&offer), Some(DiscountChoice::Volume));
        assert_eq!(asked, 1);
    }

    #[test]
    fn test_always_decider() {
        let offer = DiscountOffer {
            member: Money::ZERO,
            volume: Money::ZERO,
        };
        assert_eq!(always(None).decide(&offer), None);
        assert_eq!(
            always(Some(DiscountChoice::Member)).decide(&offer),
            Some(DiscountChoice::Member)
        );
    }
}
