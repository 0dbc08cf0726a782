use crate::catalog::InMemoryCatalog;
use crate::config::FeedConfig;
use crate::error::{CatalogError, Result};
use crate::types::PlayerRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

/// Client for the Fantasy Premier League elements feed
pub struct FplFetcher {
    config: FeedConfig,
    client: Client,
}

/// Bootstrap form of the feed; everything but `elements` is ignored
#[derive(Deserialize)]
struct BootstrapPayload {
    elements: Vec<PlayerRecord>,
}

impl FplFetcher {
    /// Create a new fetcher
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("lineup-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch every player and index them into a catalog
    pub async fn fetch_catalog(&self) -> Result<InMemoryCatalog> {
        let players = self.fetch_players().await?;
        Ok(InMemoryCatalog::from_records(players))
    }

    /// Fetch every player, retrying transient failures with backoff
    pub async fn fetch_players(&self) -> Result<Vec<PlayerRecord>> {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match self.fetch_once().await {
                Ok(players) => return Ok(players),
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    attempt += 1;
                    let delay = retry.delay_for(attempt);
                    warn!(
                        "Feed request failed ({}), retry {}/{} in {:?}",
                        e, attempt, retry.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<PlayerRecord>> {
        info!("Fetching players from: {}", self.config.url);

        let response = self.client.get(&self.config.url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::UnexpectedStatus(response.status()));
        }

        let body = response.text().await?;
        info!("Successfully fetched feed ({} bytes)", body.len());

        let players = decode_feed(&body)?;
        info!("Decoded {} players", players.len());
        Ok(players)
    }
}

/// Decode a feed body into player records
///
/// The feed has been served both as a bare element list and wrapped in
/// the bootstrap object; the first non-whitespace byte picks the form.
pub fn decode_feed(body: &str) -> Result<Vec<PlayerRecord>> {
    if body.trim_start().starts_with('{') {
        let payload: BootstrapPayload = serde_json::from_str(body)?;
        Ok(payload.elements)
    } else {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlayerCatalog;

    const ELEMENTS: &str = r#"[
        {"id": 1, "code": 37265, "first_name": "Petr", "second_name": "Cech",
         "element_type": 1, "now_cost": 50, "form": "3.0", "points_per_game": "4.1"},
        {"id": 2, "code": 54694, "first_name": "Pierre-Emerick", "second_name": "Aubameyang",
         "element_type": 4, "now_cost": 110, "form": "6.2", "points_per_game": "5.8"}
    ]"#;

    #[test]
    fn test_decode_element_list() {
        let players = decode_feed(ELEMENTS).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].full_name(), "Pierre-Emerick Aubameyang");
    }

    #[test]
    fn test_decode_bootstrap_object() {
        let body = format!(r#"{{"events": [], "elements": {ELEMENTS}}}"#);
        let catalog = InMemoryCatalog::from_records(decode_feed(&body).unwrap());
        assert_eq!(catalog.player_count(), 2);
        assert_eq!(catalog.lookup(37265).unwrap().now_cost, 50);
    }

    #[test]
    fn test_decode_error_is_reported() {
        let result = decode_feed(r#"[{"code": 1}]"#);
        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_bootstrap_decode_error_names_field() {
        let body = r#"{"elements": [{"code": 1, "first_name": "A", "second_name": "B",
            "element_type": 2, "form": "1.0", "points_per_game": "1.0"}]}"#;

        match decode_feed(body) {
            Err(CatalogError::Decode(e)) => assert!(e.to_string().contains("now_cost"), "{e}"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FeedConfig { url: String::new(), ..Default::default() };
        assert!(matches!(FplFetcher::new(config), Err(CatalogError::Config(_))));
    }
}
