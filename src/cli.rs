use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "beacon",
    about = "Report CI build/test outcomes to an observability platform",
    version,
    after_help = "Delivery failures are logged, not fatal, unless --strict or `delivery: strict` is set."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to beacon.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a report file's metrics and events to the ingest endpoints
    Send {
        /// Report file (YAML) with metric and event records
        file: PathBuf,

        /// Ingest endpoint base URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// API token (overrides config and BEACON_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Exit nonzero if any delivery fails
        #[arg(long)]
        strict: bool,

        /// Render payloads without issuing network calls
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
