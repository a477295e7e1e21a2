//! Canonical fixture types.
//!
//! - [`Outcome`] - One of the three settlement possibilities
//! - [`FixtureKey`] - Composite identity of a fixture (home, away, league)
//! - [`BookmakerOdds`] - One bookmaker's three prices for a fixture
//! - [`Fixture`] - One sporting event with its aggregated bookmaker quotes

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One of the three settlement possibilities of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite fixture identity.
///
/// Equality and hashing use the normalized components only: each part is
/// whitespace-trimmed and lowercased at construction, so formatting
/// differences between bookmakers cannot produce distinct keys for the same
/// fixture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    home: String,
    away: String,
    league: String,
}

impl FixtureKey {
    /// Build a key from display names, normalizing each component.
    #[must_use]
    pub fn new(home: &str, away: &str, league: &str) -> Self {
        Self {
            home: home.trim().to_lowercase(),
            away: away.trim().to_lowercase(),
            league: league.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn home(&self) -> &str {
        &self.home
    }

    #[must_use]
    pub fn away(&self) -> &str {
        &self.away
    }

    #[must_use]
    pub fn league(&self) -> &str {
        &self.league
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.home, self.away, self.league)
    }
}

/// One bookmaker's three prices for a fixture, plus capture metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerOdds {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
    pub captured_at: DateTime<Utc>,
    pub url: String,
}

impl BookmakerOdds {
    /// Get the price for one outcome.
    #[must_use]
    pub const fn price(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }
}

/// One sporting event with its aggregated per-bookmaker quotes.
///
/// Invariant: each bookmaker appears at most once; the latest quote received
/// for a bookmaker replaces any prior one. A fixture with zero entries is
/// invalid and is never surfaced by the normalizer.
///
/// The bookmaker map is a `BTreeMap` so every computation over it iterates in
/// a deterministic order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    key: FixtureKey,
    home_team: String,
    away_team: String,
    league: String,
    match_name: String,
    kickoff: Option<DateTime<Utc>>,
    books: BTreeMap<String, BookmakerOdds>,
}

impl Fixture {
    /// Create a fixture with no bookmaker entries yet.
    #[must_use]
    pub fn new(
        key: FixtureKey,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        league: impl Into<String>,
        match_name: impl Into<String>,
        kickoff: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key,
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: league.into(),
            match_name: match_name.into(),
            kickoff,
            books: BTreeMap::new(),
        }
    }

    /// Insert or replace a bookmaker's quote.
    ///
    /// A later capture timestamp wins; on equal timestamps the incoming quote
    /// wins (last received replaces).
    pub fn upsert(&mut self, bookmaker: impl Into<String>, odds: BookmakerOdds) {
        let bookmaker = bookmaker.into();
        match self.books.get(&bookmaker) {
            Some(existing) if existing.captured_at > odds.captured_at => {}
            _ => {
                self.books.insert(bookmaker, odds);
            }
        }
    }

    #[must_use]
    pub fn key(&self) -> &FixtureKey {
        &self.key
    }

    #[must_use]
    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    #[must_use]
    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    #[must_use]
    pub fn league(&self) -> &str {
        &self.league
    }

    #[must_use]
    pub fn match_name(&self) -> &str {
        &self.match_name
    }

    #[must_use]
    pub const fn kickoff(&self) -> Option<DateTime<Utc>> {
        self.kickoff
    }

    /// Per-bookmaker quotes, keyed by bookmaker id.
    #[must_use]
    pub const fn books(&self) -> &BTreeMap<String, BookmakerOdds> {
        &self.books
    }

    #[must_use]
    pub fn bookmaker_count(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn odds(home: Decimal, at: DateTime<Utc>) -> BookmakerOdds {
        BookmakerOdds {
            home,
            draw: dec!(3.40),
            away: dec!(3.20),
            captured_at: at,
            url: String::new(),
        }
    }

    fn ts(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, secs).unwrap()
    }

    #[test]
    fn key_normalizes_case_and_whitespace() {
        let a = FixtureKey::new("  Rapid Wien ", "Sturm Graz", "Austrian Bundesliga");
        let b = FixtureKey::new("rapid wien", "STURM GRAZ", " austrian bundesliga");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_leagues_yield_distinct_keys() {
        let a = FixtureKey::new("Rapid", "Sturm", "Bundesliga");
        let b = FixtureKey::new("Rapid", "Sturm", "Cup");
        assert_ne!(a, b);
    }

    #[test]
    fn upsert_keeps_later_capture() {
        let key = FixtureKey::new("Rapid", "Sturm", "Bundesliga");
        let mut fixture = Fixture::new(key, "Rapid", "Sturm", "Bundesliga", "Rapid vs Sturm", None);

        fixture.upsert("tipico", odds(dec!(2.10), ts(10)));
        fixture.upsert("tipico", odds(dec!(2.20), ts(20)));
        assert_eq!(fixture.books()["tipico"].home, dec!(2.20));

        // Older capture must not replace a newer one
        fixture.upsert("tipico", odds(dec!(1.90), ts(5)));
        assert_eq!(fixture.books()["tipico"].home, dec!(2.20));
    }

    #[test]
    fn upsert_equal_timestamp_last_wins() {
        let key = FixtureKey::new("Rapid", "Sturm", "Bundesliga");
        let mut fixture = Fixture::new(key, "Rapid", "Sturm", "Bundesliga", "Rapid vs Sturm", None);

        fixture.upsert("rabona", odds(dec!(2.00), ts(10)));
        fixture.upsert("rabona", odds(dec!(2.05), ts(10)));
        assert_eq!(fixture.books()["rabona"].home, dec!(2.05));
    }
}
