//! Volume discount tiers.

use rust_decimal::Decimal;

/// One closed subtotal range `[min, max]` and the discount rate it earns.
///
/// `max == None` leaves the range open upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeTier {
    pub min: Decimal,
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

impl VolumeTier {
    #[must_use]
    pub const fn new(min: Decimal, max: Option<Decimal>, rate: Decimal) -> Self {
        Self { min, max, rate }
    }

    /// Whether `subtotal` falls inside this closed range.
    #[must_use]
    pub fn contains(&self, subtotal: Decimal) -> bool {
        subtotal >= self.min && self.max.is_none_or(|max| subtotal <= max)
    }
}

/// Ordered volume tiers; the first tier containing a subtotal wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeTiers(Vec<VolumeTier>);

impl VolumeTiers {
    #[must_use]
    pub const fn new(tiers: Vec<VolumeTier>) -> Self {
        Self(tiers)
    }

    /// Discount rate for `subtotal`.
    ///
    /// Subtotals outside every tier (below the first, or in the sub-cent gap
    /// between two closed ranges such as `49.995`) earn no volume discount.
    #[must_use]
    pub fn rate_for(&self, subtotal: Decimal) -> Decimal {
        self.0
            .iter()
            .find(|tier| tier.contains(subtotal))
            .map_or(Decimal::ZERO, |tier| tier.rate)
    }

    #[must_use]
    pub fn tiers(&self) -> &[VolumeTier] {
        &self.0
    }
}

impl Default for VolumeTiers {
    /// `[0, 49.99] → 0%`, `[50, 99.99] → 5%`, `[100, 199.99] → 10%`,
    /// `[200, ∞) → 15%`.
    fn default() -> Self {
        Self(vec![
            VolumeTier::new(Decimal::ZERO, Some(Decimal::new(4999, 2)), Decimal::ZERO),
            VolumeTier::new(
                Decimal::new(50, 0),
                Some(Decimal::new(9999, 2)),
                Decimal::new(5, 2),
            ),
            VolumeTier::new(
                Decimal::new(100, 0),
                Some(Decimal::new(19999, 2)),
                Decimal::new(10, 2),
            ),
            VolumeTier::new(Decimal::new(200, 0), None, Decimal::new(15, 2)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(subtotal: Decimal) -> Decimal {
        VolumeTiers::default().rate_for(subtotal)
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(rate(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(rate(Decimal::new(4999, 2)), Decimal::ZERO);
        assert_eq!(rate(Decimal::new(50, 0)), Decimal::new(5, 2));
        assert_eq!(rate(Decimal::new(9999, 2)), Decimal::new(5, 2));
        assert_eq!(rate(Decimal::new(100, 0)), Decimal::new(10, 2));
        assert_eq!(rate(Decimal::new(19999, 2)), Decimal::new(10, 2));
        assert_eq!(rate(Decimal::new(200, 0)), Decimal::new(15, 2));
        assert_eq!(rate(Decimal::new(1_000_000, 0)), Decimal::new(15, 2));
    }

    #[test]
    fn test_sub_cent_gap_earns_nothing() {
        assert_eq!(rate(Decimal::new(49995, 3)), Decimal::ZERO);
        assert_eq!(rate(Decimal::new(199_995, 3)), Decimal::ZERO);
    }

    #[test]
    fn test_every_cent_matches_exactly_one_tier() {
        let tiers = VolumeTiers::default();
        for cents in 0..30_000_i64 {
            let subtotal = Decimal::new(cents, 2);
            let matches = tiers.tiers().iter().filter(|t| t.contains(subtotal)).count();
            assert_eq!(matches, 1, "subtotal {subtotal} matched {matches} tiers");
        }
    }

    #[test]
    fn test_first_match_wins() {
        let tiers = VolumeTiers::new(vec![
            VolumeTier::new(Decimal::ZERO, None, Decimal::new(1, 2)),
            VolumeTier::new(Decimal::ZERO, None, Decimal::new(9, 2)),
        ]);
        assert_eq!(tiers.rate_for(Decimal::new(10, 0)), Decimal::new(1, 2));
    }
}
