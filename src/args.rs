use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wayback-evolution",
    about = "Find archived snapshots of a page and describe how its messaging changed over the years",
    version,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Number of concurrent archive page fetches
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Timeout in seconds for each archived page fetch
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Timeout in seconds for the archive index lookup
    #[arg(long, global = true)]
    pub index_timeout_secs: Option<u64>,

    /// User-Agent header sent to the archive
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Archive index (CDX) endpoint
    #[arg(long, global = true)]
    pub cdx_endpoint: Option<String>,

    /// Base URL that archived pages are served from
    #[arg(long, global = true)]
    pub archive_base: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List archived snapshots of a URL grouped by year
    Search {
        /// Absolute URL of the page to look up
        url: String,
    },

    /// Look up snapshots and analyze how the page's messaging evolved
    Evolution {
        /// Absolute URL of the page to look up
        url: String,
    },

    /// Analyze a saved `{ "yearGroups": [...], "url": ... }` document
    Analyze {
        /// Path to the JSON request document
        #[arg(short, long)]
        input: PathBuf,
    },
}
