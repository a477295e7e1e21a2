//! Filter and sort pipeline for the fixture list view.

use rust_decimal::Decimal;

use crate::domain::{Fixture, Outcome};
use crate::leagues::LeagueCatalog;

/// League narrowing for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LeagueSelection {
    #[default]
    All,
    /// A catalog league key, e.g. `"la-liga"`. Unknown keys match nothing.
    Key(String),
}

/// Bookmaker narrowing for the per-outcome rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookmakerSelection {
    #[default]
    All,
    One(String),
}

impl BookmakerSelection {
    #[must_use]
    pub fn matches(&self, bookmaker: &str) -> bool {
        match self {
            BookmakerSelection::All => true,
            BookmakerSelection::One(name) => name == bookmaker,
        }
    }
}

/// List ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending by kickoff; fixtures without a kickoff keep ingestion order
    /// after the dated ones.
    Chronological,
    /// Descending by the fixture's best home-outcome price only.
    BestHomePrice,
    /// Identity; stands in for popularity until a real signal exists.
    #[default]
    SourceOrder,
}

/// User-selected view criteria. Pure value object, re-evaluated per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub league: LeagueSelection,
    pub search: String,
    pub bookmaker: BookmakerSelection,
    pub sort: SortMode,
}

/// Narrow and order a fixture collection.
///
/// Stage order is load-bearing: league narrowing, then free-text search,
/// then sort. The bookmaker selection deliberately removes nothing here; it
/// applies when the per-outcome rows are rendered, so a fixture with no
/// matching bookmaker entries still appears with empty rows.
///
/// Never mutates its input and is idempotent for unchanged criteria.
#[must_use]
pub fn apply(
    fixtures: &[Fixture],
    criteria: &FilterCriteria,
    catalog: &LeagueCatalog,
) -> Vec<Fixture> {
    let mut out: Vec<Fixture> = match &criteria.league {
        LeagueSelection::All => fixtures.to_vec(),
        LeagueSelection::Key(key) => match catalog.display_name(key) {
            Some(name) => {
                let needle = name.to_lowercase();
                fixtures
                    .iter()
                    .filter(|f| f.league().to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            // Unknown keys match nothing rather than everything
            None => Vec::new(),
        },
    };

    let needle = criteria.search.trim().to_lowercase();
    if !needle.is_empty() {
        out.retain(|f| {
            f.home_team().to_lowercase().contains(&needle)
                || f.away_team().to_lowercase().contains(&needle)
                || f.league().to_lowercase().contains(&needle)
        });
    }

    match criteria.sort {
        SortMode::Chronological => {
            // Stable: equal kickoffs and undated fixtures keep their
            // relative ingestion order, undated ones sorting last.
            out.sort_by(|a, b| match (a.kickoff(), b.kickoff()) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        SortMode::BestHomePrice => {
            out.sort_by(|a, b| best_home(b).cmp(&best_home(a)));
        }
        SortMode::SourceOrder => {}
    }

    out
}

fn best_home(fixture: &Fixture) -> Decimal {
    fixture
        .best_price(Outcome::Home)
        .map_or(Decimal::ZERO, |best| best.price)
}
