//! Configuration management for triage.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so a missing file or a partial file both work.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Corpus and ledger locations
    pub paths: PathsConfig,

    /// Embedding network settings
    pub embedding: EmbeddingConfig,

    /// Image file recognition
    pub corpus: CorpusConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.triage.triage/config.toml
    /// - Linux: ~/.config/triage/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\triage\config\config.toml
    ///
    /// Falls back to ~/.triage/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "triage", "triage")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".triage").join("config.toml")
            })
    }

    /// Get the resolved model directory path (with ~ expansion).
    pub fn model_dir(&self) -> PathBuf {
        expand(&self.general.model_dir)
    }

    /// Resolved ONNX model file for the configured network.
    pub fn model_path(&self) -> PathBuf {
        match &self.embedding.model_path {
            Some(path) => expand(path),
            None => self
                .model_dir()
                .join(self.embedding.network.model_filename()),
        }
    }

    pub fn root_dir(&self) -> PathBuf {
        expand(&self.paths.root)
    }

    pub fn unsorted_dir(&self) -> PathBuf {
        self.under_root(&self.paths.unsorted)
    }

    pub fn sorted_dir(&self) -> PathBuf {
        self.under_root(&self.paths.sorted)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.under_root(&self.paths.labels)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    fn under_root(&self, path: &Path) -> PathBuf {
        // An absolute `path` replaces the root entirely.
        self.root_dir().join(expand(path))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Network, TensorLayout};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.embedding.network, Network::ResNet50);
        assert_eq!(config.embedding.layout, TensorLayout::Nhwc);
        assert_eq!(config.corpus.supported_formats, vec!["jpg", "jpeg", "png"]);
        assert_eq!(config.limits.max_file_size_mb, 100);
    }

    #[test]
    fn test_default_layout_paths() {
        let config = Config::default();
        assert_eq!(config.unsorted_dir(), PathBuf::from("./images/unsorted"));
        assert_eq!(config.sorted_dir(), PathBuf::from("./images/sorted"));
        assert_eq!(config.labels_path(), PathBuf::from("./labels.txt"));
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let mut config = Config::default();
        config.paths.root = PathBuf::from("/data/project");
        assert_eq!(
            config.sorted_dir(),
            PathBuf::from("/data/project/images/sorted")
        );

        config.paths.labels = PathBuf::from("/var/labels.txt");
        assert_eq!(config.labels_path(), PathBuf::from("/var/labels.txt"));
    }

    #[test]
    fn test_model_path_follows_network() {
        let mut config = Config::default();
        config.general.model_dir = PathBuf::from("/models");
        assert_eq!(config.model_path(), PathBuf::from("/models/resnet50.onnx"));

        config.embedding.network = Network::Xception;
        assert_eq!(config.model_path(), PathBuf::from("/models/xception.onnx"));

        config.embedding.model_path = Some(PathBuf::from("/elsewhere/custom.onnx"));
        assert_eq!(config.model_path(), PathBuf::from("/elsewhere/custom.onnx"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[embedding]"));
        assert!(toml.contains("network = \"resnet50\""));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[embedding]\nnetwork = \"inception-v3\"\nlayout = \"nchw\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.embedding.network, Network::InceptionV3);
        assert_eq!(config.embedding.layout, TensorLayout::Nchw);
        assert_eq!(config.paths.labels, PathBuf::from("labels.txt"));
    }

    #[test]
    fn test_unknown_network_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[embedding]\nnetwork = \"alexnet\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
