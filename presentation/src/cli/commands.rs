//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the feed is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// Decide from the deployment (production / hosting)
    Auto,
    /// Server-sent events
    Streaming,
    /// Periodic pulls
    Polling,
}

impl TransportArg {
    /// Config-file spelling of this choice
    pub fn as_config_str(&self) -> &'static str {
        match self {
            TransportArg::Auto => "auto",
            TransportArg::Streaming => "streaming",
            TransportArg::Polling => "polling",
        }
    }
}

/// CLI arguments for videofactory-feed
#[derive(Parser, Debug)]
#[command(name = "videofactory-feed")]
#[command(author, version, about = "Live activity feed for the AI Video Factory orchestrator")]
#[command(long_about = r#"
Tails the orchestrator's log feed, shows which stage of the payment channel
flow a request is in, and prints the video link once generation finishes.

Records arrive either over server-sent events or by polling; production
deployments and Vercel-hosted orchestrators poll, everything else streams.

Configuration files are loaded from (in priority order):
1. VIDEOFACTORY_FEED_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit config file
3. ./feed.toml         Project-level config
4. ~/.config/videofactory-feed/config.toml   Global config

Example:
  videofactory-feed
  videofactory-feed --url https://orchestrator.example.com --transport polling
  videofactory-feed --exit-on-result --archive ./logs/feed.jsonl
"#)]
pub struct Cli {
    /// Orchestrator base URL
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Delivery strategy
    #[arg(short, long, value_enum)]
    pub transport: Option<TransportArg>,

    /// Treat this as a production deployment (selects polling in auto mode)
    #[arg(long)]
    pub production: bool,

    /// Polling interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Maximum records per poll
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Delay before a completed flow returns to idle, in milliseconds
    #[arg(long, value_name = "MS")]
    pub reset_delay_ms: Option<u64>,

    /// Keep at most this many records in the log buffer
    #[arg(long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Append every accepted record to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Exit after the first video result is shown
    #[arg(long)]
    pub exit_on_result: bool,

    /// Skip the startup reachability check
    #[arg(long)]
    pub no_probe: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print video results
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["videofactory-feed"]);
        assert!(cli.url.is_none());
        assert!(cli.transport.is_none());
        assert!(!cli.exit_on_result);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "videofactory-feed",
            "--url",
            "https://orchestrator.example.com",
            "-t",
            "polling",
            "--poll-interval-ms",
            "500",
            "--capacity",
            "200",
            "-vv",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://orchestrator.example.com"));
        assert_eq!(cli.transport, Some(TransportArg::Polling));
        assert_eq!(cli.poll_interval_ms, Some(500));
        assert_eq!(cli.capacity, Some(200));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
