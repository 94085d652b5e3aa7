//! Decimal price and money amounts.
//!
//! [`Price`] is a catalog unit price as it enters the cart. [`Money`] is any
//! signed amount the pricing engine produces. Both keep full decimal
//! precision; rounding to cents happens only when a `Money` is displayed.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number (got {0:?})")]
    NotNumeric(String),
    /// The input is a number below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is above [`Price::MAX`].
    #[error("price cannot exceed {max} (got {0})", max = Price::MAX)]
    TooLarge(Decimal),
}

/// A unit price in the shop's single currency (USD).
///
/// Parse untrusted input with [`Price::parse`]. Deserialization is lenient
/// about negative prices so that a persisted record with an odd price still
/// loads; such lines are excluded from pricing instead. Prices above
/// [`Price::MAX`] are rejected everywhere, which keeps every invoice figure
/// within `Decimal` range.
///
/// ```
/// use museum_cart_core::Price;
///
/// assert!(Price::parse("30").is_ok());
/// assert!(Price::parse("12.50").is_ok());
/// assert!(Price::parse("free").is_err());
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("79228162514264337593543950335").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Largest accepted unit price, one billion dollars.
    pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// Parse a price from user or catalog input.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotNumeric`] if the input is not a decimal
    /// number, [`PriceError::Negative`] if it is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotNumeric(s.to_owned()))?;
        Self::new(amount)
    }

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Self::bounded(amount)
    }

    fn bounded(amount: Decimal) -> Result<Self, PriceError> {
        if amount > Self::MAX {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price takes part in pricing (strictly above zero).
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::bounded(amount).map_err(de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed money amount.
///
/// Displayed as `$` followed by the absolute value rounded to cents, with
/// negative amounts wrapped in parentheses.
///
/// ```
/// use museum_cart_core::Money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Money::new(Decimal::new(9333, 3)).to_string(), "$9.33");
/// assert_eq!(Money::new(Decimal::new(-35, 1)).to_string(), "($3.50)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the unrounded decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns the amount rounded half away from zero to two places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        cents
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.rounded();
        if self.0 < Decimal::ZERO {
            write!(f, "(${})", cents.abs())
        } else {
            write!(f, "${}", cents.abs())
        }
    }
}

impl From<Price> for Money {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
