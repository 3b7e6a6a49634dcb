use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothwheel_core::EngineConfig;

mod commands;
mod trace;

#[derive(Parser)]
#[command(name = "smoothwheel")]
#[command(author, version, about = "Replay and inspect smooth wheel scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/smoothwheel/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded tick trace through the engine
    Replay {
        /// JSON-lines trace file
        trace: PathBuf,
        /// Device id used for per-device settings
        #[arg(short = 'd', long, default_value = "replay")]
        device: String,
        /// Honor trace timestamps and tick momentum on a real timer
        #[arg(long)]
        realtime: bool,
        /// Momentum tick interval in milliseconds
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
        /// Also print the native event fields
        #[arg(long)]
        fields: bool,
    },
    /// Validate configuration and print the effective settings
    Check,
    /// Print the scroll phase to native phase table
    Phases,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Replay {
            trace,
            device,
            realtime,
            tick_ms,
            fields,
        } => {
            let options = commands::replay::ReplayOptions {
                device,
                realtime,
                tick_ms,
                fields,
            };
            commands::replay::run(config, &trace, options).await
        }
        Commands::Check => commands::check::run(&config, cli.config.as_deref()),
        Commands::Phases => commands::phases::run(),
    }
}
