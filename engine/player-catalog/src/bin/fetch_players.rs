use anyhow::{Context, Result};
use player_catalog::{FeedConfig, FplFetcher, PlayerCatalog};
use tracing::info;

const DEFAULT_CACHE_PATH: &str = "data/players/elements.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cache_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CACHE_PATH.to_string());

    let config = FeedConfig::from_env().context("Invalid feed configuration")?;
    let fetcher = FplFetcher::new(config).context("Failed to create feed client")?;

    let catalog = fetcher.fetch_catalog().await.context("Failed to fetch players")?;
    catalog
        .save_to_file(&cache_path)
        .await
        .with_context(|| format!("Failed to write {cache_path}"))?;

    println!("\nMost expensive players:");
    println!("{:<8} {:<30} {:<4} {:>6}", "Code", "Name", "Pos", "Cost");
    println!("{}", "-".repeat(52));

    let mut players = catalog.players();
    players.sort_by(|a, b| b.now_cost.cmp(&a.now_cost));
    for player in players.iter().take(10) {
        println!(
            "{:<8} {:<30} {:<4} {:>6.1}",
            player.id,
            player.full_name(),
            player.position.label(),
            f64::from(player.now_cost) / 10.0
        );
    }

    info!("Saved {} players to {}", catalog.player_count(), cache_path);
    Ok(())
}
