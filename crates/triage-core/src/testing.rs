//! Test fixtures: "images" whose content is the embedding itself.

use std::path::Path;

use crate::embedding::Embedder;
use crate::error::EmbedError;

/// Reads whitespace-separated floats from the file as its embedding.
pub struct VectorFileEmbedder {
    dimension: usize,
}

impl VectorFileEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Embedder for VectorFileEmbedder {
    fn embed(&self, path: &Path) -> Result<Vec<f32>, EmbedError> {
        let text = std::fs::read_to_string(path)
            .map_err(|_| EmbedError::FileNotFound(path.to_path_buf()))?;
        text.split_whitespace()
            .map(|t| t.parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EmbedError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Write `vector` as a fake image at `path`, creating parent directories.
pub fn write_vector_image(path: &Path, vector: &[f32]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let text: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
    std::fs::write(path, text.join(" ")).unwrap();
}
