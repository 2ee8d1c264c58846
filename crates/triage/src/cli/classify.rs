//! The `triage classify` command: predictions without side effects.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use triage_core::{rank, Config, Embedder, Network, Prediction};

use super::{apply_network, setup};

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Image files to classify
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Embedding network (resnet50, vgg16, densenet, mobilenet, inception-v3, xception)
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Folder holding one subfolder per class
    #[arg(long)]
    pub sorted: Option<PathBuf>,

    /// Show at most this many classes per image
    #[arg(long, default_value = "3")]
    pub top: usize,

    /// Print one JSON object per image instead of text
    #[arg(long)]
    pub json: bool,
}

/// One classified image, as printed with `--json`.
#[derive(Debug, Serialize)]
struct ClassifiedImage<'a> {
    image: &'a str,
    predictions: &'a [Prediction],
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(sorted) = args.sorted {
        config.paths.sorted = sorted;
    }
    apply_network(&mut config, args.network);

    let engine = setup::load_engine(&config)?;
    let centroids = setup::build_centroids(&config, &engine)?;

    for image in &args.images {
        let embedding = engine.embed(image)?;
        let mut ranked = rank(&embedding, &centroids)?;
        ranked.truncate(args.top.max(1));

        let name = image.display().to_string();
        if args.json {
            let record = ClassifiedImage {
                image: &name,
                predictions: &ranked,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", format_ranked(&name, &ranked));
        }
    }

    Ok(())
}

fn format_ranked(image: &str, ranked: &[Prediction]) -> String {
    let mut out = image.to_string();
    for (i, p) in ranked.iter().enumerate() {
        out.push_str(&format!("\n  {}. {:<20} {:.4}", i + 1, p.class, p.distance));
    }
    out
}
