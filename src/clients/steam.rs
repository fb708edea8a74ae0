use crate::error::{Result, StatsError};
use reqwest::Client;

pub const STEAM_STATS_URL: &str = "http://store.steampowered.com/stats/";

pub struct SteamClient {
    client: Client,
}

impl SteamClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// One GET of the stats page, no retries. Any transport error or
    /// non-success status means the caller skips this tick.
    pub async fn fetch_stats_page(&self) -> Result<Vec<u8>> {
        let response = self.client.get(STEAM_STATS_URL).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Fetch(format!(
                "unexpected status {} from {}",
                status, STEAM_STATS_URL
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
