use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub(crate) mod cli;

pub const DEFAULT_INTERVAL_SECONDS: u64 = 3600;

pub struct Config {
    pub interval_seconds: u64,
    pub output_root: PathBuf,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();
        Self::from_args(args)
    }

    fn from_args(args: Args) -> Result<Self> {
        let interval_seconds = parse_interval(&args.interval);

        // A stalled connection must not block the loop past the next tick.
        let timeout = (interval_seconds / 2).clamp(1, 60);
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            interval_seconds,
            output_root: args.output_root,
            http_client,
        })
    }
}

/// A malformed interval falls back to the default silently.
fn parse_interval(raw: &str) -> u64 {
    raw.parse().unwrap_or(DEFAULT_INTERVAL_SECONDS)
}
