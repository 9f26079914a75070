//! bgp-speaker - Route Announcer Daemon
//!
//! Entry point for the bgp-speaker daemon.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bgp_speaker::{Speaker, SpeakerConfig};

#[derive(Debug, Parser)]
#[command(name = "bgp-speaker", about = "Announces node prefixes to BGP peers")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn load_config(args: &Args) -> anyhow::Result<SpeakerConfig> {
    match &args.config {
        Some(path) => Ok(SpeakerConfig::from_file(path)?),
        None => Ok(SpeakerConfig::default()),
    }
}

async fn run(config: SpeakerConfig) -> anyhow::Result<()> {
    // Standalone, no session manager is attached: peer sessions are registered
    // by an embedding agent through `Speaker::sessions`.
    let speaker = Speaker::new(config);

    speaker.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    speaker.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    info!("--- Starting bgp-speaker ---");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("bgp-speaker failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
