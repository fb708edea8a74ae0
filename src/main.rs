use crate::config::Config;
use crate::error::Result;
use crate::processor::Processor;

mod clients;
mod config;
mod domain;
mod error;
mod processor;
mod schedule;
mod scrapers;
mod storage;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::new()?;
    Processor::new(config).run().await
}
