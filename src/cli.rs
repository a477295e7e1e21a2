//! Operator-facing CLI: one-shot snapshots, a watch loop, league listing,
//! and per-match detail.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::app::Engine;
use crate::config::Config;
use crate::error::Result;
use crate::provider::OddsClient;
use crate::view::{BookmakerSelection, FilterCriteria, FixtureView, LeagueSelection, SortMode};

#[derive(Parser, Debug)]
#[command(name = "surebet", version, about = "Betting-odds aggregation and arbitrage detection")]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch once and print the fixture list.
    Snapshot {
        /// League filter key (e.g. "premier-league"); omit for all.
        #[arg(long)]
        league: Option<String>,
        /// Free-text search over team and league names.
        #[arg(long)]
        search: Option<String>,
        /// Show rows for one bookmaker only.
        #[arg(long)]
        bookmaker: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::Source)]
        sort: SortArg,
        /// Bypass the cache and force a provider fetch.
        #[arg(long)]
        force: bool,
    },
    /// Run the engine with periodic refresh until interrupted.
    Watch,
    /// List the selectable leagues.
    Leagues,
    /// Compare all bookmaker quotes for one match.
    Detail { match_name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    Time,
    Odds,
    Source,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Time => SortMode::Chronological,
            SortArg::Odds => SortMode::BestHomePrice,
            SortArg::Source => SortMode::SourceOrder,
        }
    }
}

#[derive(Tabled)]
struct FixtureLine {
    #[tabled(rename = "Match")]
    match_name: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Kickoff")]
    kickoff: String,
    #[tabled(rename = "Books")]
    books: usize,
    #[tabled(rename = "Best 1")]
    best_home: String,
    #[tabled(rename = "Best X")]
    best_draw: String,
    #[tabled(rename = "Best 2")]
    best_away: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

/// Run the parsed CLI command to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    config.init_logging();

    let client = OddsClient::new(&config.provider.base_url)?;
    let engine = Engine::new(client, &config);

    match cli.command.unwrap_or(Command::Snapshot {
        league: None,
        search: None,
        bookmaker: None,
        sort: SortArg::Source,
        force: false,
    }) {
        Command::Snapshot {
            league,
            search,
            bookmaker,
            sort,
            force,
        } => {
            let criteria = FilterCriteria {
                league: league.map_or(LeagueSelection::All, LeagueSelection::Key),
                search: search.unwrap_or_default(),
                bookmaker: bookmaker.map_or(BookmakerSelection::All, BookmakerSelection::One),
                sort: sort.into(),
            };
            snapshot(&engine, &criteria, force).await
        }
        Command::Watch => watch(&engine).await,
        Command::Leagues => {
            leagues(&engine);
            Ok(())
        }
        Command::Detail { match_name } => detail(&engine, &match_name).await,
    }
}

async fn snapshot<S: crate::provider::QuoteSource>(
    engine: &Engine<S>,
    criteria: &FilterCriteria,
    force: bool,
) -> Result<()> {
    if force {
        engine.refresh(true).await?;
    }
    let page = engine.render(criteria).await?;

    section("Fixtures");
    if page.fixtures.is_empty() {
        println!("no fixtures match the current filters");
        return Ok(());
    }

    let mut surebets = Vec::new();
    let mut lines = Vec::with_capacity(page.fixtures.len());
    for view in &page.fixtures {
        let arbitrage = engine.arbitrage_for(&view.key).await?;
        lines.push(fixture_line(view, arbitrage.as_ref(), &mut surebets));
    }

    let mut table = Table::new(lines);
    table.with(Style::sharp());
    println!("{table}");

    key_value(
        "Source",
        if page.cached { "cache" } else { "provider" },
    );
    key_value(
        "Expires in",
        format!("{}s", page.expires_in.as_secs()),
    );

    if !surebets.is_empty() {
        section("Arbitrage opportunities");
        for line in surebets {
            println!("{}", line.green());
        }
    }

    Ok(())
}

fn fixture_line(
    view: &FixtureView,
    arbitrage: Option<&crate::domain::ArbitrageResult>,
    surebets: &mut Vec<String>,
) -> FixtureLine {
    let (best_home, best_draw, best_away) = match &view.best {
        Some(best) => (
            best_label(&best.home.bookmakers, best.home.price),
            best_label(&best.draw.bookmakers, best.draw.price),
            best_label(&best.away.bookmakers, best.away.price),
        ),
        None => ("-".into(), "-".into(), "-".into()),
    };

    let margin = match arbitrage.and_then(|a| a.margin_pct) {
        Some(margin) => {
            surebets.push(format!(
                "{}  margin {margin}%  (1 @ {best_home} / X @ {best_draw} / 2 @ {best_away})",
                view.match_name,
            ));
            format!("{margin}%")
        }
        None => "-".to_string(),
    };

    FixtureLine {
        match_name: view.match_name.clone(),
        league: view.league.clone(),
        kickoff: view
            .kickoff
            .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        books: view.rows.len(),
        best_home,
        best_draw,
        best_away,
        margin,
    }
}

fn best_label(bookmakers: &[String], price: rust_decimal::Decimal) -> String {
    match bookmakers {
        [single] => format!("{price} ({single})"),
        _ => format!("{price}"),
    }
}

async fn watch<S: crate::provider::QuoteSource>(engine: &Engine<S>) -> Result<()> {
    match engine.refresh(false).await {
        Ok(fixtures) => println!("loaded {} fixtures", fixtures.len()),
        Err(err) => error(&format!("initial fetch failed: {err}")),
    }
    engine.run_refresh_loop().await;
    Ok(())
}

fn leagues<S: crate::provider::QuoteSource, C: crate::cache::Clock>(engine: &Engine<S, C>) {
    section("Leagues");
    for league in engine.catalog().leagues() {
        println!("{:<16} {} ({})", league.key, league.name, league.country);
    }
}

async fn detail<S: crate::provider::QuoteSource>(
    engine: &Engine<S>,
    match_name: &str,
) -> Result<()> {
    let fixtures = engine.match_details(match_name).await?;

    section(&format!("Quotes for \"{match_name}\""));
    if fixtures.is_empty() {
        println!("no bookmaker quotes found");
        return Ok(());
    }

    for fixture in &fixtures {
        println!("{}  [{}]", fixture.match_name(), fixture.league());
        for (bookmaker, odds) in fixture.books() {
            println!(
                "  {bookmaker:<12} 1 @ {:<6} X @ {:<6} 2 @ {:<6} captured {}",
                odds.home,
                odds.draw,
                odds.away,
                odds.captured_at.format("%H:%M:%S")
            );
        }
    }
    Ok(())
}

const RULE_WIDTH: usize = 56;

fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

fn key_value(label: &str, value: impl std::fmt::Display) {
    println!("{label:<14} {value}");
}

fn error(message: &str) {
    eprintln!("✗ {message}");
}
