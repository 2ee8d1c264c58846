//! Image embedding extraction.
//!
//! Everything downstream only sees the [`Embedder`] trait: a path goes in, a
//! fixed-length vector comes out. [`EmbeddingEngine`] is the production
//! implementation, running a pretrained ImageNet network through ONNX Runtime.
//!
//! # Usage
//!
//! ```rust,ignore
//! use triage_core::{Config, Embedder, EmbeddingEngine};
//!
//! let config = Config::default();
//! let engine = EmbeddingEngine::load(&config)?;
//! let embedding = engine.embed(Path::new("images/unsorted/img1.jpg"))?;
//! assert_eq!(embedding.len(), engine.dimension());
//! ```

pub(crate) mod decode;
pub(crate) mod network;
pub(crate) mod onnx;
pub(crate) mod preprocess;

use std::path::Path;

use crate::config::{Config, EmbeddingConfig};
use crate::error::EmbedError;

pub use self::decode::{DecodedImage, ImageDecoder};
pub use self::network::{Network, Normalization};
pub use self::preprocess::TensorLayout;

use self::onnx::OnnxSession;
use self::preprocess::preprocess;

/// Turns an image file into a fixed-length embedding.
pub trait Embedder {
    /// Embed the image at `path`. Slow: expect seconds per call.
    fn embed(&self, path: &Path) -> Result<Vec<f32>, EmbedError>;

    /// Length of every vector returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed(&self, path: &Path) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(path)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed(&self, path: &Path) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(path)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}

/// Engine for generating image embeddings with a pretrained network.
pub struct EmbeddingEngine {
    session: OnnxSession,
    decoder: ImageDecoder,
    network: Network,
    layout: TensorLayout,
}

impl EmbeddingEngine {
    /// Load the configured network's ONNX model.
    pub fn load(config: &Config) -> Result<Self, EmbedError> {
        let model_path = config.model_path();

        if !model_path.exists() {
            return Err(EmbedError::Model {
                path: model_path,
                message: format!(
                    "Model not found. Export {} to ONNX and place it here \
                     (see `triage models list`).",
                    config.embedding.network
                ),
            });
        }

        let network = config.embedding.network;
        tracing::info!("Loading {} model from {:?}", network, model_path);
        let session = OnnxSession::load(&model_path, config.embedding.output_name.as_deref())?;
        tracing::info!(
            "{} ready ({}x{} input, {} dimensions)",
            network,
            network.input_size(),
            network.input_size(),
            network.embedding_dim()
        );

        Ok(Self {
            session,
            decoder: ImageDecoder::new(config.limits.clone()),
            network,
            layout: config.embedding.layout,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Check whether the configured model file exists on disk.
    pub fn model_exists(config: &Config) -> bool {
        config.model_path().exists()
    }

    /// Describe the configured network for display.
    pub fn describe(config: &EmbeddingConfig) -> String {
        let net = config.network;
        format!(
            "{} ({}px, {}-d, {:?})",
            net,
            net.input_size(),
            net.embedding_dim(),
            config.layout
        )
    }
}

impl Embedder for EmbeddingEngine {
    fn embed(&self, path: &Path) -> Result<Vec<f32>, EmbedError> {
        let decoded = self.decoder.decode(path)?;
        let tensor = preprocess(
            &decoded.image,
            self.network.input_size(),
            self.network.normalization(),
            self.layout,
        );
        let embedding = self
            .session
            .embed(&tensor, self.network.embedding_dim(), path)?;
        tracing::debug!("Embedded {:?} ({} values)", path, embedding.len());
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.network.embedding_dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_reports_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.general.model_dir = dir.path().to_path_buf();

        assert!(!EmbeddingEngine::model_exists(&config));
        let err = EmbeddingEngine::load(&config).err().unwrap();
        match err {
            EmbedError::Model { path, message } => {
                assert_eq!(path, dir.path().join("resnet50.onnx"));
                assert!(message.contains("Model not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_describe() {
        let config = EmbeddingConfig {
            network: Network::Xception,
            model_path: Some(PathBuf::from("x.onnx")),
            ..EmbeddingConfig::default()
        };
        assert_eq!(EmbeddingEngine::describe(&config), "xception (299px, 2048-d, Nhwc)");
    }
}
