//! Upstream odds provider: wire types, HTTP client, and the [`QuoteSource`]
//! port the refresh cache fetches through.

pub mod client;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::BookmakerQuote;

pub use client::OddsClient;

/// A fetch against the upstream provider failed. The refresh cache retains
/// its previous entry when it sees one of these.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {code}")]
    Status { code: u16 },

    #[error("malformed provider payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One batch of raw quotes from the provider.
#[derive(Debug, Clone)]
pub struct ProviderBatch {
    pub quotes: Vec<BookmakerQuote>,
    /// Whether the provider itself answered from its own cache.
    pub provider_cached: bool,
    pub timestamp: DateTime<Utc>,
}

/// Port to the upstream odds provider.
///
/// The refresh cache talks to the provider only through this trait, so tests
/// inject a scripted source instead of a network client.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch raw quotes for a set of bookmakers.
    async fn fetch_quotes(
        &self,
        bookmakers: &[String],
        force_refresh: bool,
    ) -> Result<ProviderBatch, FetchError>;

    /// Fetch all per-bookmaker quotes for one match, for the detail view.
    async fn fetch_match_quotes(
        &self,
        match_name: &str,
    ) -> Result<Vec<BookmakerQuote>, FetchError>;
}
