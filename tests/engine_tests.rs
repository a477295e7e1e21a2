//! End-to-end engine tests: mock provider, manual clock, real pipeline.

mod support;

use std::time::Duration;

use rust_decimal_macros::dec;

use surebet::app::Engine;
use surebet::cache::CacheStatus;
use surebet::config::{CacheConfig, Config};
use surebet::domain::FixtureKey;
use surebet::provider::FetchError;
use surebet::view::{BookmakerSelection, FilterCriteria, LeagueSelection, SortMode};

use support::{arbitrage_batch, quote, start_time, ManualClock, MockSource};

fn config(ttl_secs: u64) -> Config {
    Config {
        cache: CacheConfig {
            ttl_secs,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn engine(source: MockSource, clock: ManualClock, ttl_secs: u64) -> Engine<MockSource, ManualClock> {
    Engine::with_clock(source, clock, &config(ttl_secs))
}

#[tokio::test]
async fn renders_fixture_views_with_best_price_highlights() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())]);
    let engine = engine(source, ManualClock::at(start_time()), 300);

    let page = engine.render(&FilterCriteria::default()).await.unwrap();
    assert!(!page.cached);
    assert_eq!(page.fixtures.len(), 2);

    let arsenal = &page.fixtures[0];
    assert_eq!(arsenal.match_name, "Arsenal vs Chelsea");
    assert_eq!(arsenal.rows.len(), 2);

    let best = arsenal.best.as_ref().unwrap();
    assert_eq!(best.home.price, dec!(2.10));
    assert_eq!(best.draw.price, dec!(3.80));
    assert_eq!(best.away.price, dec!(4.20));

    let tipico = arsenal.rows.iter().find(|r| r.bookmaker == "tipico").unwrap();
    let rabona = arsenal.rows.iter().find(|r| r.bookmaker == "rabona").unwrap();
    assert!(tipico.best_home && !rabona.best_home);
    assert!(rabona.best_draw && !tipico.best_draw);

    // Liverpool has a single bookmaker: highlight suppressed
    let liverpool = &page.fixtures[1];
    assert!(liverpool.rows.iter().all(|r| !r.best_home));
}

#[tokio::test]
async fn second_render_is_a_cache_hit() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())]);
    let engine = engine(source, ManualClock::at(start_time()), 300);

    let first = engine.render(&FilterCriteria::default()).await.unwrap();
    assert!(!first.cached);

    let second = engine.render(&FilterCriteria::default()).await.unwrap();
    assert!(second.cached);
    assert!(second.expires_in <= Duration::from_secs(300));
    assert_eq!(first.fixtures, second.fixtures);
}

#[tokio::test]
async fn filter_criteria_compose_over_the_cached_collection() {
    let mut batch = arbitrage_batch();
    batch.push(quote(
        "tipico",
        "Girona",
        "Sevilla",
        "La Liga",
        (dec!(2.60), dec!(3.30), dec!(2.80)),
    ));
    let source = MockSource::new(vec![Ok(batch)]);
    let engine = engine(source, ManualClock::at(start_time()), 300);

    let criteria = FilterCriteria {
        league: LeagueSelection::Key("premier-league".into()),
        search: "arsenal".into(),
        sort: SortMode::BestHomePrice,
        ..Default::default()
    };
    let page = engine.render(&criteria).await.unwrap();
    assert_eq!(page.fixtures.len(), 1);
    assert_eq!(page.fixtures[0].match_name, "Arsenal vs Chelsea");

    // Unknown league key fails closed, even with data cached
    let criteria = FilterCriteria {
        league: LeagueSelection::Key("martian-league".into()),
        ..Default::default()
    };
    assert!(engine.render(&criteria).await.unwrap().fixtures.is_empty());
}

#[tokio::test]
async fn bookmaker_selection_keeps_fixtures_with_no_matching_rows() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())]);
    let engine = engine(source, ManualClock::at(start_time()), 300);

    let criteria = FilterCriteria {
        bookmaker: BookmakerSelection::One("rabona".into()),
        ..Default::default()
    };
    let page = engine.render(&criteria).await.unwrap();

    // Liverpool has no rabona entry but must still appear, rows empty
    assert_eq!(page.fixtures.len(), 2);
    let liverpool = &page.fixtures[1];
    assert_eq!(liverpool.match_name, "Liverpool vs Everton");
    assert!(liverpool.rows.is_empty());
    assert!(liverpool.best.is_some());
}

#[tokio::test]
async fn arbitrage_for_reports_cross_bookmaker_margin() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())]);
    let engine = engine(source, ManualClock::at(start_time()), 300);
    engine.refresh(false).await.unwrap();

    let key = FixtureKey::new("Arsenal", "Chelsea", "Premier League");
    let result = engine.arbitrage_for(&key).await.unwrap().unwrap();
    // best 2.10 / 3.80 / 4.20 -> implied sum ≈ 0.9774
    assert_eq!(result.margin_pct, Some(dec!(2.26)));
    assert_eq!(result.best.home.bookmakers, vec!["tipico".to_string()]);
    assert_eq!(result.best.draw.bookmakers, vec!["rabona".to_string()]);

    let missing = FixtureKey::new("Nobody", "NoOne", "No League");
    assert!(engine.arbitrage_for(&missing).await.unwrap().is_none());
}

#[tokio::test]
async fn stale_data_refetches_and_failure_retains_previous() {
    let source = MockSource::new(vec![
        Ok(arbitrage_batch()),
        Err(FetchError::Status { code: 502 }),
    ]);
    let clock = ManualClock::at(start_time());
    let engine = engine(source, clock.clone(), 300);

    let first = engine.render(&FilterCriteria::default()).await.unwrap();
    assert_eq!(first.fixtures.len(), 2);

    clock.advance(chrono::Duration::seconds(301));
    assert_eq!(engine.cache_status(), CacheStatus::Stale);

    // The re-fetch fails; the caller sees the error...
    let err = engine.render(&FilterCriteria::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { code: 502 }));

    // ...and the previous entry survives (still stale, not empty)
    assert_eq!(engine.cache_status(), CacheStatus::Stale);
}

#[tokio::test]
async fn engine_debouncer_uses_the_configured_delay() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())]);
    let config = Config {
        cache: CacheConfig {
            debounce_ms: 25,
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = Engine::with_clock(source, ManualClock::at(start_time()), &config);

    let debouncer = engine.debouncer();
    assert_eq!(debouncer.delay(), Duration::from_millis(25));
    assert!(debouncer.settle().await);
}

#[tokio::test]
async fn match_details_bypass_the_list_cache() {
    let source = MockSource::new(vec![Ok(arbitrage_batch())])
        .with_details(arbitrage_batch());
    let engine = engine(source, ManualClock::at(start_time()), 300);

    let fixtures = engine.match_details("Arsenal vs Chelsea").await.unwrap();
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].bookmaker_count(), 2);
    // Detail fetches never count against the list cache
    assert!(matches!(engine.cache_status(), CacheStatus::Empty));
}
