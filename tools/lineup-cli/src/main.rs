//! Lineup CLI
//!
//! Operator interface for a fantasy roster:
//! - show: starting 11 and bench with form and points per game
//! - value: selling price of every player and the squad total
//! - search: find player codes by name
//! - create: build and save a new roster
//! - fetch: refresh the local player cache

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use lineup::report::format_cost;
use lineup::{LineupConfig, Roster, RosterValuator, SnapshotStore};
use player_catalog::{Cost, FeedConfig, FplFetcher, InMemoryCatalog, PlayerCatalog, PlayerId};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

const DEFAULT_CACHE_PATH: &str = "data/players/elements.json";

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Track a fantasy roster against live player prices")]
#[command(version = "0.1.0")]
struct Cli {
    /// Directory holding lineup snapshots (default: $LINEUP_DIR or ./lineups)
    #[arg(long, global = true)]
    lineups_dir: Option<PathBuf>,

    /// Read players from a cache file instead of the live feed
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Starting 11 and bench tables
    Show {
        /// Snapshot to show instead of the latest
        #[arg(long)]
        lineup: Option<PathBuf>,
    },

    /// Selling price of every squad member
    Value {
        /// Snapshot to value instead of the latest
        #[arg(long)]
        lineup: Option<PathBuf>,
    },

    /// Find players by name
    Search { query: String },

    /// Build a roster and save it as the latest lineup
    Create {
        /// Starting 11 player codes, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        starting: Vec<PlayerId>,

        /// Bench player codes, comma separated
        #[arg(long, value_delimiter = ',')]
        bench: Vec<PlayerId>,

        #[arg(long)]
        captain: PlayerId,

        #[arg(long)]
        vice_captain: PlayerId,

        /// Purchase price as CODE=COST; unlisted players use today's price
        #[arg(long = "price", value_parser = parse_price)]
        prices: Vec<(PlayerId, Cost)>,
    },

    /// Download the player feed to a cache file
    Fetch {
        #[arg(long, default_value = DEFAULT_CACHE_PATH)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    match &cli.command {
        Commands::Show { lineup } => {
            let valuator = load_valuator(&cli, lineup.as_ref()).await?;
            println!("{}", valuator.render()?);
        }
        Commands::Value { lineup } => {
            let valuator = load_valuator(&cli, lineup.as_ref()).await?;
            println!("{}", valuator.render_valuations()?);
        }
        Commands::Search { query } => {
            run_search(&load_catalog(&cli).await?, query);
        }
        Commands::Create { starting, bench, captain, vice_captain, prices } => {
            let catalog = Arc::new(load_catalog(&cli).await?);
            let roster =
                build_roster(catalog.as_ref(), starting, bench, *captain, *vice_captain, prices)?;

            let store = open_store(&cli)?;
            let valuator = RosterValuator::new(roster).with_catalog(catalog);
            let written = valuator.persist(&store)?;

            println!("{}", "✅ Lineup saved".green().bold());
            println!("  {}", written.timestamped.display());
            println!("  {}", written.latest.display());
            println!();
            println!("{}", valuator.render()?);
        }
        Commands::Fetch { out } => {
            let catalog = fetch_catalog().await?;
            catalog
                .save_to_file(out)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "{}",
                format!("✅ Saved {} players to {}", catalog.player_count(), out.display()).green()
            );
        }
    }

    Ok(())
}

fn open_store(cli: &Cli) -> Result<SnapshotStore> {
    let mut config = LineupConfig::from_env().context("Invalid lineup configuration")?;
    if let Some(dir) = &cli.lineups_dir {
        config.lineups_dir = dir.clone();
    }
    Ok(SnapshotStore::new(config)?)
}

async fn fetch_catalog() -> Result<InMemoryCatalog> {
    let config = FeedConfig::from_env().context("Invalid feed configuration")?;
    let fetcher = FplFetcher::new(config).context("Failed to create feed client")?;
    fetcher.fetch_catalog().await.context("Failed to fetch players")
}

async fn load_catalog(cli: &Cli) -> Result<InMemoryCatalog> {
    match &cli.players {
        Some(path) => InMemoryCatalog::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load players from {}", path.display())),
        None => fetch_catalog().await,
    }
}

async fn load_valuator(cli: &Cli, lineup: Option<&PathBuf>) -> Result<RosterValuator> {
    let store = open_store(cli)?;
    let mut valuator = match lineup {
        Some(path) => RosterValuator::from_snapshot(&store, path)?,
        None => RosterValuator::from_latest(&store)?,
    };

    let catalog = load_catalog(cli).await?;
    info!("Valuing lineup against {} players", catalog.player_count());
    valuator.bind_catalog(Arc::new(catalog));
    Ok(valuator)
}

fn run_search(catalog: &InMemoryCatalog, query: &str) {
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("{}", format!("❌ No players matching '{query}'").red());
        return;
    }

    println!("{:<8} {:<30} {:<4} {:>7}", "Code".bold(), "Name".bold(), "Pos".bold(), "Cost".bold());
    println!("{}", "-".repeat(52));
    for player in matches {
        println!(
            "{:<8} {:<30} {:<4} {:>7}",
            player.id,
            player.full_name(),
            player.position.label(),
            format_cost(player.now_cost)
        );
    }
}

/// Resolve purchase prices and build the roster
///
/// Every squad member must exist in the catalog; players without an
/// explicit price are recorded at their current cost.
fn build_roster(
    catalog: &dyn PlayerCatalog,
    starting: &[PlayerId],
    bench: &[PlayerId],
    captain: PlayerId,
    vice_captain: PlayerId,
    prices: &[(PlayerId, Cost)],
) -> Result<Roster> {
    let explicit: BTreeMap<PlayerId, Cost> = prices.iter().copied().collect();

    let mut original_cost = BTreeMap::new();
    for &id in starting.iter().chain(bench) {
        let player = catalog.lookup(id)?;
        original_cost.insert(id, explicit.get(&id).copied().unwrap_or(player.now_cost));
    }

    if let Some(stray) = explicit.keys().find(|id| !original_cost.contains_key(*id)) {
        bail!("price given for player {stray}, who is not in the squad");
    }

    Ok(Roster::from_spec(starting.to_vec(), bench.to_vec(), captain, vice_captain, original_cost)?)
}

fn parse_price(s: &str) -> std::result::Result<(PlayerId, Cost), String> {
    let (id, cost) = s.split_once('=').ok_or_else(|| format!("expected CODE=COST, got '{s}'"))?;
    let id = id.trim().parse().map_err(|_| format!("invalid player code '{id}'"))?;
    let cost = cost.trim().parse().map_err(|_| format!("invalid cost '{cost}'"))?;
    Ok((id, cost))
}
