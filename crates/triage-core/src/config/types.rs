//! Sub-configuration structs with their defaults.

use crate::embedding::{Network, TensorLayout};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory where ONNX models are stored
    pub model_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("~/.triage/models"),
        }
    }
}

/// Corpus layout. Relative entries resolve against `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Project root
    pub root: PathBuf,

    /// Flat pool of images waiting to be sorted
    pub unsorted: PathBuf,

    /// One subdirectory per known class
    pub sorted: PathBuf,

    /// Append-only label ledger
    pub labels: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            unsorted: PathBuf::from("images/unsorted"),
            sorted: PathBuf::from("images/sorted"),
            labels: PathBuf::from("labels.txt"),
        }
    }
}

/// Embedding network settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Pretrained network ("resnet50", "vgg16", "densenet", "mobilenet",
    /// "inception-v3", "xception")
    pub network: Network,

    /// Explicit ONNX file; defaults to `{model_dir}/{network}.onnx`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    /// Input tensor layout of the exported model
    pub layout: TensorLayout,

    /// Output tensor holding the embedding; defaults to the first output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
}

/// Which files count as images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Recognised extensions (case-insensitive)
    pub supported_formats: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
