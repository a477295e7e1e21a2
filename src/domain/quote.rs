//! Raw per-bookmaker quote records as received from the odds provider.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::MalformedQuote;

/// One raw quote for a single match from a single bookmaker.
///
/// This is the external shape: prices may be missing and team names may be
/// blank. Records are immutable once received; the normalizer validates them
/// before anything downstream sees a [`super::Fixture`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerQuote {
    pub bookmaker: String,
    pub match_name: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: Option<DateTime<Utc>>,
    pub home_odds: Option<Decimal>,
    pub draw_odds: Option<Decimal>,
    pub away_odds: Option<Decimal>,
    pub captured_at: DateTime<Utc>,
    pub url: String,
}

impl BookmakerQuote {
    /// Validate the record for normalization.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedQuote`] when a team name is blank or any of the
    /// three prices is missing or non-positive.
    pub fn validate(&self) -> Result<(), MalformedQuote> {
        if self.home_team.trim().is_empty() {
            return Err(self.malformed("missing home team"));
        }
        if self.away_team.trim().is_empty() {
            return Err(self.malformed("missing away team"));
        }
        self.check_price(self.home_odds, "home-win price")?;
        self.check_price(self.draw_odds, "draw price")?;
        self.check_price(self.away_odds, "away-win price")?;
        Ok(())
    }

    fn check_price(
        &self,
        price: Option<Decimal>,
        label: &'static str,
    ) -> Result<(), MalformedQuote> {
        match price {
            None => Err(MalformedQuote {
                bookmaker: self.bookmaker.clone(),
                reason: label,
            }),
            Some(p) if p <= Decimal::ZERO => Err(MalformedQuote {
                bookmaker: self.bookmaker.clone(),
                reason: label,
            }),
            Some(_) => Ok(()),
        }
    }

    fn malformed(&self, reason: &'static str) -> MalformedQuote {
        MalformedQuote {
            bookmaker: self.bookmaker.clone(),
            reason,
        }
    }
}
