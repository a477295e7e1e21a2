//! HTTP client for the odds provider's REST API.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::domain::BookmakerQuote;

use super::types::{parse_timestamp, CompareEnvelope, OddsEnvelope};
use super::{FetchError, ProviderBatch, QuoteSource};

pub struct OddsClient {
    client: Client,
    base_url: Url,
}

impl OddsClient {
    /// Create a client for the given provider base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Url`] when the base URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    async fn get_json(&self, url: Url) -> Result<String, FetchError> {
        debug!(url = %url, "provider request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuoteSource for OddsClient {
    async fn fetch_quotes(
        &self,
        bookmakers: &[String],
        force_refresh: bool,
    ) -> Result<ProviderBatch, FetchError> {
        let mut url = self.base_url.join("api/odds")?;
        url.query_pairs_mut()
            .append_pair("bookmakers", &bookmakers.join(","))
            .append_pair("force_refresh", if force_refresh { "true" } else { "false" });

        info!(bookmakers = bookmakers.len(), force_refresh, "fetching odds");

        let body = self.get_json(url).await?;
        let envelope: OddsEnvelope = serde_json::from_str(&body)?;

        let timestamp = parse_timestamp(&envelope.timestamp).unwrap_or_else(Utc::now);
        let quotes: Vec<BookmakerQuote> = envelope
            .data
            .odds
            .into_iter()
            .map(|wire| wire.into_quote(timestamp))
            .collect();

        debug!(
            count = quotes.len(),
            provider_cached = envelope.cached,
            "fetched odds"
        );

        Ok(ProviderBatch {
            quotes,
            provider_cached: envelope.cached,
            timestamp,
        })
    }

    async fn fetch_match_quotes(
        &self,
        match_name: &str,
    ) -> Result<Vec<BookmakerQuote>, FetchError> {
        let mut url = self.base_url.join("api/compare/")?;
        // path_segments_mut percent-encodes the match name for us
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(match_name);

        info!(match_name, "fetching match detail");

        let body = self.get_json(url).await?;
        let envelope: CompareEnvelope = serde_json::from_str(&body)?;

        let timestamp = parse_timestamp(&envelope.timestamp).unwrap_or_else(Utc::now);
        Ok(envelope
            .odds
            .into_iter()
            .map(|wire| wire.into_quote(timestamp))
            .collect())
    }
}
