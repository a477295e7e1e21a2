//! Refresh cache: the authoritative in-memory fixture collection.
//!
//! Owns one [`CacheEntry`] and decides, per load, whether to serve cached
//! fixtures or re-fetch from the provider. The state machine is
//! `EMPTY -> FRESH -> STALE -> (fetching) -> FRESH`, with a failed fetch
//! reverting to whatever held before.
//!
//! Both the clock and the quote source are injected so the whole machine is
//! testable without timers or network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{normalize, Fixture};
use crate::leagues::LeagueCatalog;
use crate::provider::{FetchError, QuoteSource};

/// Wall-clock source. Injected so freshness decisions are deterministic in
/// tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The cached fixture collection plus its provenance.
///
/// Replaced wholesale on every successful fetch; never partially mutated.
#[derive(Debug, Clone)]
struct CacheEntry {
    fixtures: Vec<Fixture>,
    bookmakers: Vec<String>,
    captured_at: DateTime<Utc>,
    /// Fetch sequence number that produced this entry. A completing fetch
    /// with an older number is discarded instead of overwriting newer data.
    sequence: u64,
}

/// Freshness of the cache at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No data ever fetched.
    Empty,
    /// Within TTL; non-forced loads are served without network.
    Fresh { expires_in: Duration },
    /// TTL elapsed; the next non-forced load fetches.
    Stale,
}

/// What a `load` hands back to the caller.
#[derive(Debug, Clone)]
pub struct CacheRead {
    pub fixtures: Vec<Fixture>,
    pub bookmakers: Vec<String>,
    /// True when served from the cache without touching the network.
    pub cached: bool,
    /// Remaining time before the data goes stale, for display.
    pub expires_in: Duration,
}

/// Time-bounded cache over the fixture collection.
pub struct RefreshCache<S, C = SystemClock> {
    source: S,
    clock: C,
    catalog: LeagueCatalog,
    ttl: chrono::Duration,
    bookmakers: Vec<String>,
    entry: RwLock<Option<CacheEntry>>,
    sequence: AtomicU64,
}

impl<S: QuoteSource, C: Clock> RefreshCache<S, C> {
    pub fn new(
        source: S,
        clock: C,
        catalog: LeagueCatalog,
        ttl: Duration,
        bookmakers: Vec<String>,
    ) -> Self {
        Self {
            source,
            clock,
            catalog,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            bookmakers,
            entry: RwLock::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current freshness, without touching the network.
    pub fn status(&self) -> CacheStatus {
        let now = self.clock.now();
        match self.entry.read().as_ref() {
            None => CacheStatus::Empty,
            Some(entry) => {
                let age = now - entry.captured_at;
                if age < self.ttl {
                    CacheStatus::Fresh {
                        expires_in: (self.ttl - age).to_std().unwrap_or(Duration::ZERO),
                    }
                } else {
                    CacheStatus::Stale
                }
            }
        }
    }

    /// Load the fixture collection, fetching from the provider when the
    /// cache is empty or stale, or when `force` is set.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the fetch fails; the previous entry, if
    /// any, is retained unmodified.
    pub async fn load(&self, force: bool) -> Result<CacheRead, FetchError> {
        if !force {
            if let Some(read) = self.read_fresh() {
                debug!(
                    fixtures = read.fixtures.len(),
                    expires_in_secs = read.expires_in.as_secs(),
                    "cache hit"
                );
                return Ok(read);
            }
        }

        // Sequence is taken before the fetch so overlapping fetches can be
        // ordered by when they started.
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let batch = self.source.fetch_quotes(&self.bookmakers, force).await?;
        let fixtures = normalize(batch.quotes, &self.catalog);
        let captured_at = self.clock.now();

        let mut guard = self.entry.write();
        if let Some(current) = guard.as_ref() {
            if current.sequence > sequence {
                // A newer fetch already landed while ours was in flight.
                warn!(
                    sequence,
                    stored = current.sequence,
                    "discarding stale in-flight fetch result"
                );
                return Ok(self.read_entry(current, true));
            }
        }

        info!(
            fixtures = fixtures.len(),
            provider_cached = batch.provider_cached,
            "cache refreshed"
        );

        let entry = CacheEntry {
            fixtures,
            bookmakers: self.bookmakers.clone(),
            captured_at,
            sequence,
        };
        let read = self.read_entry(&entry, false);
        *guard = Some(entry);
        Ok(read)
    }

    /// Fetch all per-bookmaker quotes for one match (detail view). Bypasses
    /// the cache entirely; the detail view is independent of the list view.
    pub async fn match_details(&self, match_name: &str) -> Result<Vec<Fixture>, FetchError> {
        let quotes = self.source.fetch_match_quotes(match_name).await?;
        Ok(normalize(quotes, &self.catalog))
    }

    fn read_fresh(&self) -> Option<CacheRead> {
        let guard = self.entry.read();
        let entry = guard.as_ref()?;
        if self.clock.now() - entry.captured_at < self.ttl {
            Some(self.read_entry(entry, true))
        } else {
            None
        }
    }

    fn read_entry(&self, entry: &CacheEntry, cached: bool) -> CacheRead {
        let age = self.clock.now() - entry.captured_at;
        CacheRead {
            fixtures: entry.fixtures.clone(),
            bookmakers: entry.bookmakers.clone(),
            cached,
            expires_in: (self.ttl - age).to_std().unwrap_or(Duration::ZERO),
        }
    }
}
