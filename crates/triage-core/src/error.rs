//! Error types for the triage library.
//!
//! Errors are grouped by the component that raises them so messages carry the
//! relevant context (file paths, class names, vector lengths).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for triage operations.
#[derive(Error, Debug)]
pub enum TriageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image decoding or embedding errors
    #[error("Embedding error: {0}")]
    Embed(#[from] EmbedError),

    /// Classification precondition failures
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Sorted/unsorted corpus errors
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while turning an image file into an embedding.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Model loading failed
    #[error("Model error for {path}: {message}")]
    Model { path: PathBuf, message: String },

    /// Inference or output extraction failed
    #[error("Embedding failed for {path}: {message}")]
    Embedding { path: PathBuf, message: String },
}

/// Classification precondition failures.
#[derive(Error, Debug, PartialEq)]
pub enum ClassifyError {
    /// No class in the sorted corpus produced a centroid
    #[error("No class centroids available: the sorted corpus has no classes with images")]
    NoCentroids,

    /// Every distance was NaN
    #[error("No centroid is comparable to the query: every distance is NaN")]
    NoComparableCentroid,

    /// Query and centroid vectors have different lengths
    #[error("Embedding dimension mismatch: centroids have {expected} values, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors about the on-disk corpus layout and class names.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A required directory does not exist
    #[error("Directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// A directory entry could not be read (e.g. a broken symlink)
    #[error("Cannot read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// The image to move is not in the unsorted pool
    #[error("Image not found in unsorted pool: {0}")]
    MissingImage(PathBuf),

    /// Embeddings inside one centroid set disagree on length
    #[error("Inconsistent embedding dimension in class '{class}': expected {expected}, got {actual}")]
    InconsistentDimension {
        class: String,
        expected: usize,
        actual: usize,
    },

    /// Class name cannot be used as a folder name or ledger token
    #[error("Invalid class name '{name}': {reason}")]
    InvalidClassName { name: String, reason: String },

    /// The move target already exists
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),
}

/// Convenience type alias for triage results.
pub type Result<T> = std::result::Result<T, TriageError>;
