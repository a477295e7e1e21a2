#![allow(dead_code)]

//! Shared helpers for integration tests: a manual clock and a scripted
//! quote source, so the engine runs without timers or network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use surebet::cache::Clock;
use surebet::domain::BookmakerQuote;
use surebet::provider::{FetchError, ProviderBatch, QuoteSource};

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(start)))
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.0.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
}

/// Quote source serving scripted list batches and detail responses.
pub struct MockSource {
    batches: Mutex<Vec<Result<Vec<BookmakerQuote>, FetchError>>>,
    details: Mutex<Vec<BookmakerQuote>>,
    fetches: AtomicUsize,
}

impl MockSource {
    pub fn new(batches: Vec<Result<Vec<BookmakerQuote>, FetchError>>) -> Self {
        Self {
            batches: Mutex::new(batches),
            details: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_details(self, details: Vec<BookmakerQuote>) -> Self {
        *self.details.lock() = details;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MockSource {
    async fn fetch_quotes(
        &self,
        _bookmakers: &[String],
        _force_refresh: bool,
    ) -> Result<ProviderBatch, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut batches = self.batches.lock();
        if batches.is_empty() {
            return Err(FetchError::Status { code: 503 });
        }
        batches.remove(0).map(|quotes| ProviderBatch {
            quotes,
            provider_cached: false,
            timestamp: start_time(),
        })
    }

    async fn fetch_match_quotes(
        &self,
        match_name: &str,
    ) -> Result<Vec<BookmakerQuote>, FetchError> {
        let needle = match_name.to_lowercase();
        Ok(self
            .details
            .lock()
            .iter()
            .filter(|q| q.match_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// A complete, valid quote record.
pub fn quote(
    bookmaker: &str,
    home_team: &str,
    away_team: &str,
    league: &str,
    prices: (Decimal, Decimal, Decimal),
) -> BookmakerQuote {
    BookmakerQuote {
        bookmaker: bookmaker.into(),
        match_name: format!("{home_team} vs {away_team}"),
        home_team: home_team.into(),
        away_team: away_team.into(),
        league: league.into(),
        kickoff: None,
        home_odds: Some(prices.0),
        draw_odds: Some(prices.1),
        away_odds: Some(prices.2),
        captured_at: start_time(),
        url: String::new(),
    }
}

/// Two bookmakers over two Premier League fixtures; the Arsenal fixture's
/// cross-bookmaker best prices form a surebet.
pub fn arbitrage_batch() -> Vec<BookmakerQuote> {
    vec![
        quote(
            "tipico",
            "Arsenal",
            "Chelsea",
            "Premier League",
            (dec!(2.10), dec!(3.10), dec!(4.20)),
        ),
        quote(
            "rabona",
            "Arsenal",
            "Chelsea",
            "Premier League",
            (dec!(1.90), dec!(3.80), dec!(3.60)),
        ),
        quote(
            "tipico",
            "Liverpool",
            "Everton",
            "Premier League",
            (dec!(1.80), dec!(3.60), dec!(4.50)),
        ),
    ]
}
