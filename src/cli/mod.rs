//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod classify;
pub mod config;
pub mod distance;
pub mod generate;
pub mod insight;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Simulated nearby suppliers around a location
#[derive(Parser)]
#[command(name = "supplier-radar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a batch of suppliers around a location
    Generate(generate::GenerateArgs),

    /// Classify a coordinate as land or water
    Classify(classify::ClassifyArgs),

    /// Great-circle distance between two coordinates
    Distance(distance::DistanceArgs),

    /// Show location insight for a coordinate
    Insight(insight::InsightArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show configuration summary and server status
    Status(status::StatusArgs),
}

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` overrides `default_filter`. Safe to call more than once.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Commands::Generate(args) => generate::run(args).await,
        Commands::Classify(args) => classify::run(args),
        Commands::Distance(args) => distance::run(args),
        Commands::Insight(args) => insight::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
