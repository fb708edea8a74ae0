use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Snapshot interval in seconds
    #[arg(long, default_value = "3600")]
    pub interval: String,

    /// Directory under which daily stats files are written
    #[arg(long, default_value = "stats")]
    pub output_root: PathBuf,
}
