//! Quote normalization: raw per-bookmaker records into canonical fixtures.

use std::collections::HashMap;

use tracing::warn;

use crate::leagues::LeagueCatalog;

use super::fixture::{BookmakerOdds, Fixture, FixtureKey};
use super::quote::BookmakerQuote;

/// Group raw quotes into canonical fixtures.
///
/// Pure over its input and idempotent: normalizing structurally equal batches
/// yields structurally equal fixtures. Output preserves the first-appearance
/// order of fixture keys; this is the ingestion order the sort modes fall
/// back on.
///
/// Malformed records (blank team name, missing or non-positive price) are
/// dropped with a warning and the rest of the batch continues. Duplicate
/// (fixture, bookmaker) pairs resolve to the later capture timestamp, with
/// timestamp ties going to the later record in the batch.
#[must_use]
pub fn normalize(raw: Vec<BookmakerQuote>, catalog: &LeagueCatalog) -> Vec<Fixture> {
    let mut fixtures: Vec<Fixture> = Vec::new();
    let mut index: HashMap<FixtureKey, usize> = HashMap::new();

    for quote in raw {
        if let Err(err) = quote.validate() {
            warn!(
                bookmaker = %err.bookmaker,
                reason = err.reason,
                match_name = %quote.match_name,
                "dropping malformed quote"
            );
            continue;
        }

        let league = catalog.canonicalize(&quote.league);
        let key = FixtureKey::new(&quote.home_team, &quote.away_team, &league);

        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                fixtures.push(Fixture::new(
                    key.clone(),
                    quote.home_team.trim(),
                    quote.away_team.trim(),
                    league.clone(),
                    quote.match_name.trim(),
                    quote.kickoff,
                ));
                index.insert(key, fixtures.len() - 1);
                fixtures.len() - 1
            }
        };

        // validate() guarantees all three prices are present
        let odds = BookmakerOdds {
            home: quote.home_odds.unwrap_or_default(),
            draw: quote.draw_odds.unwrap_or_default(),
            away: quote.away_odds.unwrap_or_default(),
            captured_at: quote.captured_at,
            url: quote.url,
        };
        fixtures[slot].upsert(quote.bookmaker, odds);
    }

    fixtures
}
