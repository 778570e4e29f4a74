//! AARDI Generator - synthetic telemetry for the voice dashboard demo
//!
//! Pushes one random metrics record to OpenObserve right away, then one every
//! interval, until interrupted (or until `--count` batches were sent).

mod config;
mod publisher;

use anyhow::{Context, Result};
use clap::Parser;
use config::GeneratorConfig;
use publisher::Publisher;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aardi-generator", about = "Publish synthetic metrics to OpenObserve")]
struct Args {
    /// TOML config file (store settings, interval)
    #[arg(long, env = "AARDI_GENERATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds between batches, overrides the config file
    #[arg(long)]
    interval: Option<u64>,

    /// Stop after this many batches
    #[arg(long)]
    count: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aardi_generator=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = GeneratorConfig::load(args.config.as_deref())
        .await
        .context("Failed to load generator config")?;
    if let Some(secs) = args.interval {
        config.interval_secs = secs;
    }
    let period = Duration::from_secs(config.interval_secs.max(1));

    let publisher = Publisher::new(&config)?;

    info!("🚀 Generating telemetry data for OpenObserve...");
    info!("📊 Data is being sent to {}", config.store.url);
    info!("Press Ctrl+C to stop");

    tokio::select! {
        res = publisher.run(period, args.count) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping generator");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["aardi-generator", "--interval", "5", "--count", "3"]).unwrap();
        assert_eq!(args.interval, Some(5));
        assert_eq!(args.count, Some(3));
    }
}
