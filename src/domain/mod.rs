//! Canonical domain types and pure odds computation.
//!
//! Everything here is synchronous, side-effect free, and safe to call from
//! any number of render triggers concurrently: nothing mutates shared state.
//!
//! - [`quote`] - Raw per-bookmaker quote records (external shape)
//! - [`fixture`] - Canonical fixtures keyed by (home, away, league)
//! - [`normalize`] - Raw quotes into fixtures
//! - [`best_price`] - Best price per outcome across bookmakers
//! - [`arbitrage`] - Surebet detection over best prices

pub mod arbitrage;
pub mod best_price;
pub mod error;
pub mod fixture;
pub mod normalize;
pub mod quote;

pub use arbitrage::ArbitrageResult;
pub use best_price::{BestPrice, BestPrices};
pub use error::{DomainError, MalformedQuote};
pub use fixture::{BookmakerOdds, Fixture, FixtureKey, Outcome};
pub use normalize::normalize;
pub use quote::BookmakerQuote;
