//! Odds aggregation: best available price per outcome across bookmakers.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::fixture::{Fixture, Outcome};

/// The best available price for one outcome of one fixture.
///
/// Computed on demand, never persisted. `tied` is true when two or more
/// bookmakers share the maximum; the presentation layer suppresses the
/// best-price highlight in that case, and likewise when only a single
/// bookmaker covers the fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPrice {
    pub outcome: Outcome,
    pub price: Decimal,
    /// Bookmakers achieving the maximum, in deterministic (sorted) order.
    pub bookmakers: Vec<String>,
    pub tied: bool,
}

/// Best prices for all three outcomes of a fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPrices {
    pub home: BestPrice,
    pub draw: BestPrice,
    pub away: BestPrice,
}

impl BestPrices {
    #[must_use]
    pub const fn get(&self, outcome: Outcome) -> &BestPrice {
        match outcome {
            Outcome::Home => &self.home,
            Outcome::Draw => &self.draw,
            Outcome::Away => &self.away,
        }
    }
}

impl Fixture {
    /// Best price for one outcome across all bookmakers covering the fixture.
    ///
    /// Comparison is exact decimal ordering with no rounding; rounding for
    /// display is the presentation layer's concern. Deterministic regardless
    /// of insertion order because the bookmaker map iterates sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyFixture`] when the fixture has no
    /// bookmaker entries. Normalizer output never does; this is a defensive
    /// check only.
    pub fn best_price(&self, outcome: Outcome) -> Result<BestPrice, DomainError> {
        let mut best: Option<Decimal> = None;
        for odds in self.books().values() {
            let price = odds.price(outcome);
            if best.map_or(true, |b| price > b) {
                best = Some(price);
            }
        }

        let price = best.ok_or_else(|| DomainError::EmptyFixture {
            key: self.key().to_string(),
        })?;

        let bookmakers: Vec<String> = self
            .books()
            .iter()
            .filter(|(_, odds)| odds.price(outcome) == price)
            .map(|(name, _)| name.clone())
            .collect();
        let tied = bookmakers.len() >= 2;

        Ok(BestPrice {
            outcome,
            price,
            bookmakers,
            tied,
        })
    }

    /// Best prices for all three outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyFixture`] when the fixture has no
    /// bookmaker entries.
    pub fn best_prices(&self) -> Result<BestPrices, DomainError> {
        Ok(BestPrices {
            home: self.best_price(Outcome::Home)?,
            draw: self.best_price(Outcome::Draw)?,
            away: self.best_price(Outcome::Away)?,
        })
    }
}
