//! Image preprocessing for ImageNet-pretrained networks.
//!
//! The image is resized to the network's square input size with nearest
//! neighbour sampling, converted to RGB, normalized with the network's
//! convention and packed into a batch-of-one tensor.

use image::DynamicImage;
use ndarray::Array4;
use serde::{Deserialize, Serialize};

use super::network::Normalization;

/// Number of color channels (RGB).
const CHANNELS: usize = 3;

/// ImageNet per-channel mean in BGR order, 0-255 scale (caffe convention).
const CAFFE_MEAN_BGR: [f32; 3] = [103.939, 116.779, 123.68];

/// ImageNet per-channel mean and std in RGB order, 0-1 scale (torch convention).
const TORCH_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const TORCH_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Input tensor layout of an exported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// [batch, height, width, channels] (Keras exports)
    #[default]
    Nhwc,
    /// [batch, channels, height, width] (PyTorch exports)
    Nchw,
}

/// Preprocess an image into a `[1, ...]` tensor for inference.
pub fn preprocess(
    image: &DynamicImage,
    image_size: u32,
    normalization: Normalization,
    layout: TensorLayout,
) -> Array4<f32> {
    let resized = image.resize_exact(
        image_size,
        image_size,
        image::imageops::FilterType::Nearest,
    );
    let rgb = resized.to_rgb8();

    let size = image_size as usize;
    let mut tensor = match layout {
        TensorLayout::Nhwc => Array4::<f32>::zeros((1, size, size, CHANNELS)),
        TensorLayout::Nchw => Array4::<f32>::zeros((1, CHANNELS, size, size)),
    };

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for (c, value) in normalize_pixel(pixel.0, normalization)
            .into_iter()
            .enumerate()
        {
            match layout {
                TensorLayout::Nhwc => tensor[[0, y, x, c]] = value,
                TensorLayout::Nchw => tensor[[0, c, y, x]] = value,
            }
        }
    }

    tensor
}

/// Normalize one RGB pixel. Caffe output is in BGR channel order.
fn normalize_pixel(rgb: [u8; 3], normalization: Normalization) -> [f32; 3] {
    let [r, g, b] = rgb.map(|v| v as f32);
    match normalization {
        Normalization::Caffe => [
            b - CAFFE_MEAN_BGR[0],
            g - CAFFE_MEAN_BGR[1],
            r - CAFFE_MEAN_BGR[2],
        ],
        Normalization::Tf => [r / 127.5 - 1.0, g / 127.5 - 1.0, b / 127.5 - 1.0],
        Normalization::Torch => [
            (r / 255.0 - TORCH_MEAN[0]) / TORCH_STD[0],
            (g / 255.0 - TORCH_MEAN[1]) / TORCH_STD[1],
            (b / 255.0 - TORCH_MEAN[2]) / TORCH_STD[2],
        ],
    }
}
