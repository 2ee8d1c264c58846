//! Subcommand implementations.

pub mod centroids;
pub mod classify;
pub mod config;
pub mod labels;
pub mod models;
pub mod prompt;
pub mod run;
pub mod setup;
pub mod theme;

use std::path::{Path, PathBuf};

use clap::Args;
use triage_core::{Config, Network};

/// Load an explicitly requested config file.
///
/// A missing file is an error here, unlike the default location.
pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    Config::load_from(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))
}

/// Project layout flags. Relative paths resolve against the root.
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Project root directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Folder of images waiting to be sorted
    #[arg(long)]
    pub unsorted: Option<PathBuf>,

    /// Folder holding one subfolder per class
    #[arg(long)]
    pub sorted: Option<PathBuf>,

    /// Label ledger file
    #[arg(long)]
    pub labels: Option<PathBuf>,
}

impl PathArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.paths.root = root.clone();
        }
        if let Some(unsorted) = &self.unsorted {
            config.paths.unsorted = unsorted.clone();
        }
        if let Some(sorted) = &self.sorted {
            config.paths.sorted = sorted.clone();
        }
        if let Some(labels) = &self.labels {
            config.paths.labels = labels.clone();
        }
    }
}

/// Override the configured network, keeping any explicit model path only
/// when the network is unchanged.
pub fn apply_network(config: &mut Config, network: Option<Network>) {
    if let Some(network) = network {
        if network != config.embedding.network {
            config.embedding.model_path = None;
        }
        config.embedding.network = network;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_args_override_only_given_fields() {
        let mut config = Config::default();
        let args = PathArgs {
            root: Some(PathBuf::from("/data/photos")),
            sorted: Some(PathBuf::from("done")),
            ..PathArgs::default()
        };
        args.apply(&mut config);

        assert_eq!(config.sorted_dir(), PathBuf::from("/data/photos/done"));
        assert_eq!(
            config.unsorted_dir(),
            PathBuf::from("/data/photos/images/unsorted")
        );
        assert_eq!(config.labels_path(), PathBuf::from("/data/photos/labels.txt"));
    }

    #[test]
    fn network_change_drops_model_override() {
        let mut config = Config::default();
        config.embedding.model_path = Some(PathBuf::from("/models/custom.onnx"));

        apply_network(&mut config, Some(Network::Xception));

        assert_eq!(config.embedding.network, Network::Xception);
        assert!(config.embedding.model_path.is_none());
    }

    #[test]
    fn same_network_keeps_model_override() {
        let mut config = Config::default();
        config.embedding.model_path = Some(PathBuf::from("/models/custom.onnx"));

        apply_network(&mut config, Some(Network::ResNet50));
        apply_network(&mut config, None);

        assert_eq!(
            config.embedding.model_path,
            Some(PathBuf::from("/models/custom.onnx"))
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triage.toml");
        std::fs::write(&path, "[embedding]\nnetwork = \"vgg16\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.embedding.network, Network::Vgg16);
    }
}
