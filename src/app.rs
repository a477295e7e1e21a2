//! Engine orchestration: wires the refresh cache to the view pipeline and
//! drives periodic refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cache::{CacheStatus, Clock, RefreshCache, SystemClock};
use crate::config::Config;
use crate::domain::{ArbitrageResult, Fixture, FixtureKey};
use crate::leagues::LeagueCatalog;
use crate::provider::{FetchError, QuoteSource};
use crate::view::{self, FilterCriteria, FixtureView};

/// One rendered page of the fixture list.
#[derive(Debug, Clone)]
pub struct Page {
    pub fixtures: Vec<FixtureView>,
    /// True when the underlying load was served from the cache.
    pub cached: bool,
    /// Remaining TTL of the underlying data, for display.
    pub expires_in: Duration,
}

/// The odds engine: refresh cache plus the pure render pipeline.
///
/// Rendering never mutates shared state, so any number of triggers (search
/// keystrokes, filter changes, timer ticks) may call [`Engine::render`]
/// concurrently; only fetches serialize through the cache's own entry lock.
pub struct Engine<S, C = SystemClock> {
    cache: RefreshCache<S, C>,
    catalog: LeagueCatalog,
    refresh_interval: Duration,
    debounce: Duration,
}

impl<S: QuoteSource> Engine<S, SystemClock> {
    /// Build an engine on the system clock.
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_clock(source, SystemClock, config)
    }
}

impl<S: QuoteSource, C: Clock> Engine<S, C> {
    /// Build an engine with an injected clock (used by tests).
    pub fn with_clock(source: S, clock: C, config: &Config) -> Self {
        let catalog = LeagueCatalog::new();
        Self {
            cache: RefreshCache::new(
                source,
                clock,
                catalog.clone(),
                Duration::from_secs(config.cache.ttl_secs),
                config.bookmakers.clone(),
            ),
            catalog,
            refresh_interval: Duration::from_secs(config.cache.refresh_interval_secs),
            debounce: Duration::from_millis(config.cache.debounce_ms),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &LeagueCatalog {
        &self.catalog
    }

    /// Debouncer with the configured search-input delay. The presentation
    /// layer holds one of these and gates recomputation on
    /// [`Debouncer::settle`].
    #[must_use]
    pub fn debouncer(&self) -> Debouncer {
        Debouncer::new(self.debounce)
    }

    /// Current cache freshness, without touching the network.
    #[must_use]
    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    /// Refresh the fixture collection. `force` bypasses freshness and always
    /// fetches; this is the manual-refresh path.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the fetch fails; previously cached
    /// fixtures are retained.
    pub async fn refresh(&self, force: bool) -> Result<Vec<Fixture>, FetchError> {
        Ok(self.cache.load(force).await?.fixtures)
    }

    /// Render the fixture list under the given criteria.
    ///
    /// Loads through the cache (fetching only when empty or stale), then
    /// applies the filter/sort pipeline and builds view-models.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] only when a fetch was needed and failed.
    pub async fn render(&self, criteria: &FilterCriteria) -> Result<Page, FetchError> {
        let read = self.cache.load(false).await?;
        let fixtures = view::apply(&read.fixtures, criteria, &self.catalog);
        Ok(Page {
            fixtures: view::build_views(&fixtures, &criteria.bookmaker),
            cached: read.cached,
            expires_in: read.expires_in,
        })
    }

    /// Evaluate one fixture for arbitrage, by key.
    ///
    /// Returns `None` when the fixture is not in the current collection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] only when a fetch was needed and failed.
    pub async fn arbitrage_for(
        &self,
        key: &FixtureKey,
    ) -> Result<Option<ArbitrageResult>, FetchError> {
        let read = self.cache.load(false).await?;
        let Some(fixture) = read.fixtures.iter().find(|f| f.key() == key) else {
            return Ok(None);
        };
        match fixture.arbitrage() {
            Ok(result) => Ok(Some(result)),
            Err(err) => {
                // Empty fixture in the cache is a logic error, not user-facing
                error!(key = %key, error = %err, "arbitrage evaluation failed");
                Ok(None)
            }
        }
    }

    /// Fetch the full per-bookmaker quote list for one match (detail view).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the detail fetch fails.
    pub async fn match_details(&self, match_name: &str) -> Result<Vec<Fixture>, FetchError> {
        self.cache.match_details(match_name).await
    }

    /// Periodic refresh driver: ticks a non-forced load on the configured
    /// interval until the task is dropped. Fetch failures are logged and the
    /// previous data stays served.
    pub async fn run_refresh_loop(&self) {
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            interval_secs = self.refresh_interval.as_secs(),
            "periodic refresh started"
        );

        loop {
            interval.tick().await;
            match self.cache.load(false).await {
                Ok(read) if read.cached => {}
                Ok(read) => {
                    info!(fixtures = read.fixtures.len(), "periodic refresh complete");
                }
                Err(err) => {
                    warn!(error = %err, "periodic refresh failed, serving previous data");
                }
            }
        }
    }
}

/// Collapses rapid repeated triggers (search keystrokes) into one.
///
/// Each call to [`Debouncer::settle`] starts a fresh generation and waits
/// the configured delay; it resolves `true` only if no newer call arrived in
/// the meantime. Purely a recomputation-avoidance affordance, not a
/// correctness requirement.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the debounce delay. Returns `true` when this trigger is
    /// still the latest and should proceed.
    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        generation == self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn debouncer_latest_trigger_wins() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(30)));

        let first = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = debouncer.settle();

        assert!(second.await);
        assert!(!first.await.unwrap());
    }

    #[tokio::test]
    async fn debouncer_lone_trigger_proceeds() {
        let debouncer = Debouncer::new(Duration::from_millis(5));
        assert!(debouncer.settle().await);
    }
}
