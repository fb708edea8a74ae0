pub(crate) mod player_counts;

pub use player_counts::scrape_player_counts;
