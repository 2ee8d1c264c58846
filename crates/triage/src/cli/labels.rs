//! The `triage labels` command: show the label ledger.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use triage_core::{Config, Labels, Ledger};

/// Arguments for the `labels` command.
#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// Label ledger file
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Print a JSON object (filename → class) instead of text
    #[arg(long)]
    pub json: bool,

    /// Print the number of images per class instead of every label
    #[arg(long, conflicts_with = "json")]
    pub counts: bool,
}

/// Execute the labels command.
pub fn execute(args: LabelsArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(labels) = args.labels {
        config.paths.labels = labels;
    }

    let ledger = Ledger::new(config.labels_path());
    let labels = ledger.read();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&labels)?);
    } else if args.counts {
        for (class, count) in class_counts(&labels) {
            println!("{count:>6} {class}");
        }
    } else {
        for (filename, class) in &labels {
            println!("{filename} {class}");
        }
    }

    tracing::debug!("{} labels in {}", labels.len(), ledger.path().display());
    Ok(())
}

fn class_counts(labels: &Labels) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for class in labels.values() {
        *counts.entry(class.as_str()).or_insert(0) += 1;
    }
    counts
}
