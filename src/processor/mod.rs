use crate::clients::SteamClient;
use crate::config::Config;
use crate::error::Result;
use crate::schedule;
use crate::scrapers::scrape_player_counts;
use crate::storage::DayFileStore;
use chrono::Local;
use std::time::Duration;
use tracing::{info, warn};

/// The perpetual scrape loop: fetch, extract, append, sleep. Strictly
/// sequential; the tick timer is armed before the fetch so a slow
/// response does not compound tick delay.
pub struct Processor {
    client: SteamClient,
    store: DayFileStore,
    interval: Duration,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self {
            client: SteamClient::new(config.http_client),
            store: DayFileStore::new(config.output_root),
            interval: Duration::from_secs(config.interval_seconds),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // `local` is refreshed when a tick fires, so the rollover for a
        // given midnight lands on the tick after it.
        let mut local = Local::now().timestamp();
        let mut next_midnight = schedule::next_day(local);

        // The first tick needs somewhere to write; failing here is fatal.
        self.store.open_for(local)?;
        info!(
            interval = self.interval.as_secs(),
            "starting snapshot loop"
        );

        loop {
            let tick = tokio::time::sleep(self.interval);
            tokio::pin!(tick);

            match self.client.fetch_stats_page().await {
                Ok(body) => {
                    if local >= next_midnight {
                        next_midnight = schedule::next_day(local);
                        if let Err(e) = self.store.rollover(local) {
                            warn!("rollover open failed: {e}");
                        }
                    }

                    let snapshot = scrape_player_counts(&body);
                    info!(games = snapshot.games.len(), "scraped snapshot");
                    if let Err(e) = self.store.append(&snapshot) {
                        warn!("append failed: {e}");
                    }
                }
                Err(e) => warn!("fetch failed, skipping tick: {e}"),
            }

            tokio::select! {
                _ = &mut tick => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, shutting down");
                    return Ok(());
                }
            }
            local = Local::now().timestamp();
        }
    }
}
