use std::time::Duration;

use clap::{Parser, Subcommand};
use xrp_intel_core::ConfigLoader;
use xrp_intel_worker::{Scheduler, Workers};

#[derive(Parser)]
#[command(name = "xrp-intel")]
#[command(about = "Market intelligence workers for a single crypto asset", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest trades, derivatives metrics, and exchange flows
    Ingest {
        /// Run continuously instead of once
        #[arg(long = "loop")]
        run_loop: bool,
        /// Seconds between cycles (defaults to the configured cadence)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Fetch and classify news headlines
    News {
        /// Run continuously instead of once
        #[arg(long = "loop")]
        run_loop: bool,
        /// Seconds between cycles (defaults to the configured cadence)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Compute signals and the composite score
    Analytics {
        /// Run continuously instead of once
        #[arg(long = "loop")]
        run_loop: bool,
        /// Seconds between cycles (defaults to the configured cadence)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Run all workers sequentially on one interval
    Run {
        /// Seconds between cycles (defaults to the configured cadence)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load_from(&cli.config)?;
    let workers = Workers::connect(&config).await?;

    match cli.command {
        Commands::Ingest { run_loop, interval } => {
            let interval = interval.unwrap_or(config.worker.ingest_interval_secs);
            if run_loop {
                workers.ingest.run_loop(Duration::from_secs(interval)).await;
            } else {
                workers.ingest.run_once().await?;
            }
        }
        Commands::News { run_loop, interval } => {
            let interval = interval.unwrap_or(config.worker.news_interval_secs);
            if run_loop {
                workers.news.run_loop(Duration::from_secs(interval)).await;
            } else {
                workers.news.run_once().await?;
            }
        }
        Commands::Analytics { run_loop, interval } => {
            let interval = interval.unwrap_or(config.worker.analytics_interval_secs);
            if run_loop {
                workers
                    .analytics
                    .run_loop(Duration::from_secs(interval))
                    .await;
            } else {
                workers.analytics.run_once().await?;
            }
        }
        Commands::Run { interval } => {
            let interval = interval.unwrap_or(config.worker.scheduler_interval_secs);
            Scheduler::new(workers, Duration::from_secs(interval))
                .run()
                .await;
        }
    }

    Ok(())
}
