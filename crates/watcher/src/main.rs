//! tweet-watch CLI - push a notification for each new matching post.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tweet_watch::{Monitor, MonitorSettings, SearchFetcher};

/// Watch an account for new keyword-matching posts.
///
/// All settings come from environment variables (TWITTER_USERNAME,
/// TWEET_SEARCH_TERMS, POLLING_INTERVAL, STATE_FILE, PUSHOVER_TOKEN, ...).
#[derive(Parser)]
#[command(name = "tweet-watch")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run a single poll cycle and exit (for CronJob use)
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("tweet_watch=debug,notify=debug,info")
        } else {
            EnvFilter::new("tweet_watch=info,notify=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let settings = MonitorSettings::from_env()?;
    if !settings.has_credentials() {
        tracing::warn!("PUSHOVER_TOKEN or PUSHOVER_USER not set; new posts will not be pushed");
    }

    let fetcher = Arc::new(SearchFetcher::new(settings.search_base_url.clone()));
    let notifier = settings.notifier();
    let mut monitor = Monitor::new(settings, fetcher, notifier);

    if cli.once {
        monitor.run_once().await?;
        return Ok(());
    }

    monitor.run().await
}
