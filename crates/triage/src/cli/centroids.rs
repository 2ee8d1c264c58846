//! The `triage centroids` command: build and summarise class centroids.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use triage_core::{CentroidSet, Config, Network};

use super::{apply_network, setup};

/// Arguments for the `centroids` command.
#[derive(Args, Debug)]
pub struct CentroidsArgs {
    /// Folder holding one subfolder per class
    #[arg(long)]
    pub sorted: Option<PathBuf>,

    /// Embedding network (resnet50, vgg16, densenet, mobilenet, inception-v3, xception)
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CentroidSummary<'a> {
    class: &'a str,
    images: usize,
    dimension: usize,
}

/// Execute the centroids command.
pub fn execute(args: CentroidsArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(sorted) = args.sorted {
        config.paths.sorted = sorted;
    }
    apply_network(&mut config, args.network);

    let engine = setup::load_engine(&config)?;
    let centroids = setup::build_centroids(&config, &engine)?;

    if centroids.is_empty() {
        tracing::warn!(
            "No class folder under {} contains images",
            config.sorted_dir().display()
        );
    }

    let rows = summarise(&centroids);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{:<24} {:>8} {:>10}", "CLASS", "IMAGES", "DIMENSION");
        for row in &rows {
            println!("{:<24} {:>8} {:>10}", row.class, row.images, row.dimension);
        }
    }

    Ok(())
}

fn summarise(centroids: &CentroidSet) -> Vec<CentroidSummary<'_>> {
    centroids
        .entries()
        .map(|(class, centroid)| CentroidSummary {
            class,
            images: centroid.image_count,
            dimension: centroid.vector.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_follows_class_order() {
        let mut set = CentroidSet::new();
        set.insert("dog", vec![10.0, 10.0], 1).unwrap();
        set.insert("cat", vec![1.0, 0.0], 2).unwrap();

        let rows = summarise(&set);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].class, "cat");
        assert_eq!(rows[0].images, 2);
        assert_eq!(rows[0].dimension, 2);
        assert_eq!(rows[1].class, "dog");
    }

    #[test]
    fn empty_set_has_no_rows() {
        assert!(summarise(&CentroidSet::new()).is_empty());
    }
}
