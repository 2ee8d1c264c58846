//! Triage CLI - sort images into class folders by nearest centroid.
//!
//! Images already filed under `images/sorted/<class>/` define the classes.
//! Each image waiting in `images/unsorted/` gets a predicted class, which the
//! user confirms or corrects; the decision is logged to `labels.txt` and the
//! image is moved into its class folder.
//!
//! # Usage
//!
//! ```bash
//! # Interactive triage in the current directory
//! triage
//!
//! # Same, against another project root and network
//! triage run --root ~/photos --network xception
//!
//! # Predict without moving anything
//! triage classify images/unsorted/img1.jpg
//!
//! # Inspect the ledger
//! triage labels --json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Triage - sort images into class folders by nearest centroid.
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sort unsorted images interactively (default)
    Run(cli::run::RunArgs),

    /// Print ranked predictions for images without moving them
    Classify(cli::classify::ClassifyArgs),

    /// Build class centroids and summarise them
    Centroids(cli::centroids::CentroidsArgs),

    /// Show recorded labels
    Labels(cli::labels::LabelsArgs),

    /// Show expected model files
    Models(cli::models::ModelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli.config.as_deref() {
        Some(path) => cli::load_config_from(path)?,
        None => match triage_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `triage config path`."
                );
                triage_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Triage v{}", triage_core::VERSION);

    let config_path = cli.config.unwrap_or_else(triage_core::Config::default_path);

    match cli.command {
        None => cli::run::execute(cli::run::RunArgs::default(), config),
        Some(Commands::Run(args)) => cli::run::execute(args, config),
        Some(Commands::Classify(args)) => cli::classify::execute(args, config),
        Some(Commands::Centroids(args)) => cli::centroids::execute(args, config),
        Some(Commands::Labels(args)) => cli::labels::execute(args, config),
        Some(Commands::Models(args)) => cli::models::execute(args, &config),
        Some(Commands::Config(args)) => cli::config::execute(args, &config, &config_path),
    }
}
