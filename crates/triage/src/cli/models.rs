//! The `triage models` command: where model files are expected.

use clap::{Args, Subcommand};
use triage_core::{Config, Network};

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Subcommands for model management.
#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List supported networks and whether their ONNX files are present
    List,

    /// Show model directory path
    Path,
}

/// One row of `triage models list`.
struct ModelStatus {
    network: Network,
    file: std::path::PathBuf,
    installed: bool,
    selected: bool,
}

fn model_statuses(config: &Config) -> Vec<ModelStatus> {
    Network::ALL
        .into_iter()
        .map(|network| {
            let selected = network == config.embedding.network;
            let file = if selected {
                config.model_path()
            } else {
                config.model_dir().join(network.model_filename())
            };
            ModelStatus {
                network,
                installed: file.exists(),
                file,
                selected,
            }
        })
        .collect()
}

/// Execute the models command.
pub fn execute(args: ModelsArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ModelsCommand::List => {
            println!("Model directory: {}", config.model_dir().display());
            println!();
            for status in model_statuses(config) {
                let net = status.network;
                println!(
                    "{} {:<13} {:>3}px {:>5}-d {:<6} {} {}",
                    if status.selected { "*" } else { " " },
                    net.name(),
                    net.input_size(),
                    net.embedding_dim(),
                    format!("{:?}", net.normalization()).to_lowercase(),
                    if status.installed { "✓" } else { "✗" },
                    status.file.display()
                );
            }
            println!();
            println!("* configured network. Export each network to ONNX under the names shown.");
        }

        ModelsCommand::Path => {
            println!("{}", config.model_dir().display());
        }
    }

    Ok(())
}
