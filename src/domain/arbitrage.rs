//! Arbitrage detection over a fixture's cross-bookmaker best prices.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::best_price::BestPrices;
use super::error::DomainError;
use super::fixture::Fixture;

/// Arbitrage evaluation for one fixture.
///
/// `implied_sum` is `1/bestHome + 1/bestDraw + 1/bestAway` over the best
/// price per outcome, which may come from three different bookmakers; that
/// cross-bookmaker combination is what makes a surebet possible at all.
/// `margin_pct` is present only when the sum is below one — absent, not
/// zero, so the display can tell "no edge" from "zero edge".
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageResult {
    pub best: BestPrices,
    pub implied_sum: Decimal,
    /// Guaranteed profit margin in percent, rounded to two decimal places.
    pub margin_pct: Option<Decimal>,
}

impl ArbitrageResult {
    #[must_use]
    pub const fn is_opportunity(&self) -> bool {
        self.margin_pct.is_some()
    }
}

impl Fixture {
    /// Evaluate this fixture for a risk-free profit condition.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyFixture`] when the fixture has no
    /// bookmaker entries (inherited from the aggregator).
    pub fn arbitrage(&self) -> Result<ArbitrageResult, DomainError> {
        let best = self.best_prices()?;

        let implied_sum = Decimal::ONE / best.home.price
            + Decimal::ONE / best.draw.price
            + Decimal::ONE / best.away.price;

        let margin_pct = if implied_sum < Decimal::ONE {
            Some(((Decimal::ONE - implied_sum) * dec!(100)).round_dp(2))
        } else {
            None
        };

        Ok(ArbitrageResult {
            best,
            implied_sum,
            margin_pct,
        })
    }
}
