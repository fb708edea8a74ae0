use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Fetch error: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
