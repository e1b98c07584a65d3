use crate::app::{View, DEFAULT_LIMIT, DEFAULT_LOG_LINES};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "skw", version, about = "Skills manager sync watcher TUI")]
pub struct Cli {
    /// Base URL of the skills manager server
    #[arg(short, long, default_value = "http://127.0.0.1:5199")]
    pub url: String,

    /// Ranking view to load
    #[arg(short, long, value_enum, default_value = "all-time")]
    pub view: View,

    /// Number of top skills to fetch
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Log tail length in lines
    #[arg(long, default_value_t = DEFAULT_LOG_LINES)]
    pub lines: u32,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Write debug logs to the state directory
    #[arg(long)]
    pub verbose: bool,
}
