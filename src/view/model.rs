//! View-models handed to the presentation layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::error;

use crate::domain::{BestPrices, Fixture, FixtureKey, Outcome};

use super::filter::BookmakerSelection;

/// One bookmaker's prices rendered for a fixture, with per-outcome
/// best-price highlight flags.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerRow {
    pub bookmaker: String,
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
    pub captured_at: DateTime<Utc>,
    pub best_home: bool,
    pub best_draw: bool,
    pub best_away: bool,
}

/// One fixture as the presentation layer sees it.
///
/// `rows` already has the bookmaker selection applied; a fixture whose
/// selected bookmaker has no entry still renders, with empty rows (existing
/// display behavior, preserved deliberately). `best` is computed over the
/// full bookmaker map, so the cross-bookmaker best prices stay visible even
/// when rows are narrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureView {
    pub key: FixtureKey,
    pub match_name: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: Option<DateTime<Utc>>,
    pub rows: Vec<BookmakerRow>,
    pub best: Option<BestPrices>,
}

/// Build view-models for an already filtered/sorted fixture list.
#[must_use]
pub fn build_views(fixtures: &[Fixture], bookmaker: &BookmakerSelection) -> Vec<FixtureView> {
    fixtures.iter().map(|f| build_view(f, bookmaker)).collect()
}

fn build_view(fixture: &Fixture, bookmaker: &BookmakerSelection) -> FixtureView {
    let best = match fixture.best_prices() {
        Ok(best) => Some(best),
        Err(err) => {
            // Cannot happen for normalizer output; log and render without
            // highlights rather than failing the whole page.
            error!(key = %fixture.key(), error = %err, "fixture with no bookmaker entries in view");
            None
        }
    };

    let rows = fixture
        .books()
        .iter()
        .filter(|(name, _)| bookmaker.matches(name))
        .map(|(name, odds)| BookmakerRow {
            bookmaker: name.clone(),
            home: odds.home,
            draw: odds.draw,
            away: odds.away,
            captured_at: odds.captured_at,
            best_home: highlight(fixture, best.as_ref(), Outcome::Home, name),
            best_draw: highlight(fixture, best.as_ref(), Outcome::Draw, name),
            best_away: highlight(fixture, best.as_ref(), Outcome::Away, name),
        })
        .collect();

    FixtureView {
        key: fixture.key().clone(),
        match_name: fixture.match_name().to_string(),
        home_team: fixture.home_team().to_string(),
        away_team: fixture.away_team().to_string(),
        league: fixture.league().to_string(),
        kickoff: fixture.kickoff(),
        rows,
        best,
    }
}

/// Whether a bookmaker's price gets the best-price highlight.
///
/// Suppressed when the maximum is tied and when only one bookmaker covers
/// the fixture; a highlight only means something when there is a real
/// alternative to beat.
fn highlight(
    fixture: &Fixture,
    best: Option<&BestPrices>,
    outcome: Outcome,
    bookmaker: &str,
) -> bool {
    let Some(best) = best else {
        return false;
    };
    let best = best.get(outcome);
    !best.tied
        && fixture.bookmaker_count() >= 2
        && best.bookmakers.iter().any(|b| b == bookmaker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookmakerOdds;
    use rust_decimal_macros::dec;

    fn fixture(entries: &[(&str, Decimal, Decimal, Decimal)]) -> Fixture {
        let key = FixtureKey::new("Arsenal", "Chelsea", "Premier League");
        let mut fixture = Fixture::new(
            key,
            "Arsenal",
            "Chelsea",
            "Premier League",
            "Arsenal vs Chelsea",
            None,
        );
        for (bookmaker, home, draw, away) in entries {
            fixture.upsert(
                *bookmaker,
                BookmakerOdds {
                    home: *home,
                    draw: *draw,
                    away: *away,
                    captured_at: Utc::now(),
                    url: String::new(),
                },
            );
        }
        fixture
    }

    #[test]
    fn highlights_unique_best_price_per_outcome() {
        let fixtures = vec![fixture(&[
            ("tipico", dec!(2.10), dec!(3.40), dec!(3.20)),
            ("rabona", dec!(2.25), dec!(3.30), dec!(3.50)),
        ])];

        let views = build_views(&fixtures, &BookmakerSelection::All);
        let rows = &views[0].rows;
        let tipico = rows.iter().find(|r| r.bookmaker == "tipico").unwrap();
        let rabona = rows.iter().find(|r| r.bookmaker == "rabona").unwrap();

        assert!(rabona.best_home && !tipico.best_home);
        assert!(tipico.best_draw && !rabona.best_draw);
        assert!(rabona.best_away && !tipico.best_away);
    }

    #[test]
    fn tie_suppresses_highlight() {
        let fixtures = vec![fixture(&[
            ("tipico", dec!(2.10), dec!(3.40), dec!(3.20)),
            ("rabona", dec!(2.10), dec!(3.30), dec!(3.20)),
        ])];

        let views = build_views(&fixtures, &BookmakerSelection::All);
        assert!(views[0].rows.iter().all(|r| !r.best_home && !r.best_away));
    }

    #[test]
    fn single_bookmaker_gets_no_highlight() {
        let fixtures = vec![fixture(&[("tipico", dec!(2.10), dec!(3.40), dec!(3.20))])];

        let views = build_views(&fixtures, &BookmakerSelection::All);
        let row = &views[0].rows[0];
        assert!(!row.best_home && !row.best_draw && !row.best_away);
    }

    #[test]
    fn bookmaker_selection_narrows_rows_but_keeps_fixture() {
        let fixtures = vec![fixture(&[("tipico", dec!(2.10), dec!(3.40), dec!(3.20))])];

        let views = build_views(&fixtures, &BookmakerSelection::One("rabona".into()));
        assert_eq!(views.len(), 1);
        assert!(views[0].rows.is_empty());
        // best prices remain computed from the full map
        assert!(views[0].best.is_some());
    }
}
