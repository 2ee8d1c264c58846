//! ONNX Runtime session management and inference.
//!
//! Loads an ImageNet network exported to ONNX (truncated at its penultimate
//! layer) and runs it to produce one embedding vector per image.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;

use crate::error::EmbedError;

/// Wraps an ONNX Runtime session for image embedding.
///
/// Uses a `Mutex` because `Session::run` requires `&mut self`.
pub struct OnnxSession {
    session: Mutex<Session>,
    /// Name of the input tensor (detected from model metadata).
    input_name: String,
    /// Name of the output tensor holding the embedding.
    output_name: String,
}

impl OnnxSession {
    /// Load a network from an ONNX file.
    ///
    /// `output_name` selects the embedding tensor; `None` uses the model's
    /// first output.
    pub fn load(model_path: &Path, output_name: Option<&str>) -> Result<Self, EmbedError> {
        let session = Session::builder()
            .map_err(|e| EmbedError::Model {
                path: model_path.to_path_buf(),
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(model_path)
            .map_err(|e| EmbedError::Model {
                path: model_path.to_path_buf(),
                message: format!("Failed to load ONNX model: {e}"),
            })?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| EmbedError::Model {
                path: model_path.to_path_buf(),
                message: "Model declares no inputs".to_string(),
            })?;

        let available: Vec<String> = session
            .outputs()
            .iter()
            .map(|o| o.name().to_string())
            .collect();

        let output_name = match output_name {
            Some(name) if available.iter().any(|o| o == name) => name.to_string(),
            Some(name) => {
                return Err(EmbedError::Model {
                    path: model_path.to_path_buf(),
                    message: format!("Model has no output '{name}' (outputs: {available:?})"),
                });
            }
            None => available.first().cloned().ok_or_else(|| EmbedError::Model {
                path: model_path.to_path_buf(),
                message: "Model declares no outputs".to_string(),
            })?,
        };

        tracing::debug!(
            "Loaded ONNX model from {:?} (input: {:?}, output: {:?}, all outputs: {:?})",
            model_path,
            input_name,
            output_name,
            available
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    /// Run inference on a preprocessed `[1, ...]` tensor.
    ///
    /// The output tensor is flattened; its length must equal `expected_dim`.
    pub fn embed(
        &self,
        preprocessed: &Array4<f32>,
        expected_dim: usize,
        path: &Path,
    ) -> Result<Vec<f32>, EmbedError> {
        // Convert ndarray to (shape, flat_data) for ort.
        let shape: Vec<i64> = preprocessed.shape().iter().map(|&d| d as i64).collect();
        let flat_data: Vec<f32> = preprocessed.iter().copied().collect();

        let input_value =
            Value::from_array((shape, flat_data)).map_err(|e| EmbedError::Embedding {
                path: path.to_path_buf(),
                message: format!("Failed to create input tensor: {e}"),
            })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_value];

        let mut session = self.session.lock().map_err(|e| EmbedError::Embedding {
            path: path.to_path_buf(),
            message: format!("Session lock poisoned: {e}"),
        })?;

        let outputs = session.run(inputs).map_err(|e| EmbedError::Embedding {
            path: path.to_path_buf(),
            message: format!("ONNX inference failed: {e}"),
        })?;

        let output = outputs
            .iter()
            .find(|(name, _)| *name == self.output_name.as_str())
            .ok_or_else(|| EmbedError::Embedding {
                path: path.to_path_buf(),
                message: format!("Model did not produce output '{}'", self.output_name),
            })?;

        let (shape, data) =
            output
                .1
                .try_extract_tensor::<f32>()
                .map_err(|e| EmbedError::Embedding {
                    path: path.to_path_buf(),
                    message: format!("Failed to extract '{}' tensor: {e}", self.output_name),
                })?;

        flatten_single(data, expected_dim).ok_or_else(|| EmbedError::Embedding {
            path: path.to_path_buf(),
            message: format!(
                "Output '{}' has shape {:?}, expected {} values for one image. \
                 Export the model up to its pooling layer or set embedding.output_name.",
                self.output_name, shape, expected_dim
            ),
        })
    }
}

/// Accept any output shape that holds exactly one `expected_dim` vector,
/// e.g. `[1, D]`, `[D]` or `[1, 1, 1, D]`.
fn flatten_single(data: &[f32], expected_dim: usize) -> Option<Vec<f32>> {
    (data.len() == expected_dim).then(|| data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_single_accepts_exact_length() {
        let data = vec![0.5f32; 2048];
        assert_eq!(flatten_single(&data, 2048).unwrap().len(), 2048);
    }

    #[test]
    fn test_flatten_single_rejects_spatial_map() {
        // A [1, 7, 7, 2048] feature map is not a pooled embedding.
        let data = vec![0.0f32; 7 * 7 * 2048];
        assert!(flatten_single(&data, 2048).is_none());
    }

    #[test]
    fn test_load_missing_model_is_model_error() {
        let err = OnnxSession::load(Path::new("/nonexistent/resnet50.onnx"), None)
            .err()
            .unwrap();
        assert!(matches!(err, EmbedError::Model { .. }));
    }
}
