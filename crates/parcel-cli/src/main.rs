mod batch;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parcel_core::Platform;
use parcel_tracker::{track_with, TrackerSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "parcel-cli")]
#[command(about = "Track parcels across Taiwanese logistics platforms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one parcel and print its latest status as JSON
    Track {
        /// Platform identifier, e.g. `seven_eleven` or `shopee`
        platform: String,
        order_id: String,
        /// Include `is_delivered` and the raw platform payload
        #[arg(long)]
        full: bool,
    },
    /// Track every `<platform> <order_id>` line of a file concurrently
    Batch {
        file: PathBuf,
    },
    /// List the supported platform identifiers
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = parcel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env.ansi_logs())
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");
    let settings = TrackerSettings::from_app_config(&config);

    match cli.command {
        Commands::Track {
            platform,
            order_id,
            full,
        } => {
            let info = track_with(&platform, &order_id, &settings).await?;
            println!("{}", output::render(info.as_ref(), full));
        }
        Commands::Batch { file } => {
            let contents = tokio::fs::read_to_string(&file).await?;
            let jobs = batch::parse_jobs(&contents)?;
            tracing::info!(jobs = jobs.len(), file = %file.display(), "starting batch");
            batch::run(jobs, &settings, config.batch_concurrency).await;
        }
        Commands::Platforms => {
            for platform in Platform::ALL {
                println!("{platform}");
            }
        }
    }

    Ok(())
}
