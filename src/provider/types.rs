//! Serde types for the provider's JSON payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::BookmakerQuote;

/// Envelope for `GET /api/odds`.
#[derive(Debug, Clone, Deserialize)]
pub struct OddsEnvelope {
    pub data: OddsPayload,
    pub cached: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsPayload {
    pub odds: Vec<WireQuote>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub bookmakers: Vec<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// Envelope for `GET /api/compare/{match_name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareEnvelope {
    #[serde(rename = "match")]
    pub match_name: String,
    pub odds: Vec<WireQuote>,
    #[serde(default)]
    pub count: usize,
    pub timestamp: String,
}

/// One raw odds record on the wire.
///
/// Prices and the league are optional here; the normalizer decides what is
/// usable. Timestamps arrive as ISO-8601 strings, with or without an offset.
#[derive(Debug, Clone, Deserialize)]
pub struct WireQuote {
    pub bookmaker: String,
    pub match_name: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    pub home_odds: Option<Decimal>,
    pub draw_odds: Option<Decimal>,
    pub away_odds: Option<Decimal>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl WireQuote {
    /// Convert to the domain quote shape.
    ///
    /// An unparseable or missing capture timestamp falls back to the
    /// envelope timestamp so duplicate resolution still has something to
    /// order by.
    #[must_use]
    pub fn into_quote(self, fallback: DateTime<Utc>) -> BookmakerQuote {
        let captured_at = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(fallback);

        BookmakerQuote {
            bookmaker: self.bookmaker,
            match_name: self.match_name,
            home_team: self.home_team,
            away_team: self.away_team,
            league: self.league.unwrap_or_default(),
            kickoff: self.kickoff,
            home_odds: self.home_odds,
            draw_odds: self.draw_odds,
            away_odds: self.away_odds,
            captured_at,
            url: self.url.unwrap_or_default(),
        }
    }
}

/// Parse an ISO-8601 timestamp, tolerating the provider's offset-less form.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
