//! Interactive discount prompt.

use std::io::{BufRead, Write};

use museum_cart::{DiscountChoice, DiscountDecider, DiscountOffer};

/// Asks the shopper to pick a discount, blocking on one line of input.
///
/// End of input, a read error or an unrecognised answer all count as
/// dismissing the prompt.
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, offer: &DiscountOffer) -> std::io::Result<Option<DiscountChoice>> {
        writeln!(
            self.output,
            "Member discount: {}  Volume discount: {}",
            offer.member, offer.volume
        )?;
        write!(self.output, "{} ", DiscountOffer::PROMPT)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(DiscountChoice::from_answer(&answer))
    }
}

impl<R: BufRead, W: Write> DiscountDecider for StdinPrompt<R, W> {
    fn decide(&mut self, offer: &DiscountOffer) -> Option<DiscountChoice> {
        self.ask(offer).unwrap_or_else(|e| {
            tracing::warn!("Discount prompt failed, applying no discount: {e}");
            None
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use museum_cart::Money;

    use super::*;

    fn offer() -> DiscountOffer {
        DiscountOffer {
            member: Money::new(9.into()),
            volume: Money::new(3.into()),
        }
    }

    fn answer(input: &str) -> (Option<DiscountChoice>, String) {
        let mut shown = Vec::new();
        let choice = StdinPrompt::new(input.as_bytes(), &mut shown).decide(&offer());
        (choice, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn test_member_answer() {
        let (choice, shown) = answer("m\n");
        assert_eq!(choice, Some(DiscountChoice::Member));
        assert!(shown.contains("Member discount: $9.00"));
        assert!(shown.contains(DiscountOffer::PROMPT));
    }

    #[test]
    fn test_volume_answer() {
        assert_eq!(answer("V\n").0, Some(DiscountChoice::Volume));
    }

    #[test]
    fn test_end_of_input_dismisses() {
        assert_eq!(answer("").0, None);
    }

    #[test]
    fn test_unknown_answer_dismisses() {
        assert_eq!(answer("both please\n").0, None);
    }
}
