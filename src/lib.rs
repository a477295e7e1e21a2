//! Surebet - Betting-odds aggregation and arbitrage detection.
//!
//! This crate aggregates per-bookmaker odds quotes for sporting fixtures,
//! computes the best available price per outcome, flags cross-bookmaker
//! arbitrage opportunities, and serves a filtered/sorted fixture view while
//! avoiding redundant upstream fetches through a TTL-bounded cache.
//!
//! # Architecture
//!
//! Data flows one way through pure stages:
//!
//! - **[`provider`]** - HTTP client for the upstream odds API, behind the
//!   [`provider::QuoteSource`] port
//! - **[`domain`]** - normalization of raw quotes into canonical fixtures,
//!   best-price aggregation, and arbitrage detection (all pure)
//! - **[`cache`]** - the TTL refresh cache owning the fixture collection,
//!   with injected clock and source
//! - **[`view`]** - filter/sort pipeline and the view-models handed to the
//!   presentation layer
//! - **[`app`]** - the [`app::Engine`] tying it together, plus the periodic
//!   refresh driver and search debouncing
//!
//! # Example
//!
//! ```no_run
//! use surebet::app::Engine;
//! use surebet::config::Config;
//! use surebet::provider::OddsClient;
//! use surebet::view::FilterCriteria;
//!
//! # async fn demo() -> surebet::error::Result<()> {
//! let config = Config::default();
//! let client = OddsClient::new(&config.provider.base_url)?;
//! let engine = Engine::new(client, &config);
//! let page = engine.render(&FilterCriteria::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod leagues;
pub mod provider;
pub mod view;
