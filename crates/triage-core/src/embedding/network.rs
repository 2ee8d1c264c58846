//! Pretrained network catalogue.
//!
//! Each network fixes the input resolution, the preprocessing convention it was
//! trained with, and the length of the penultimate-layer embedding it emits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pixel normalization convention expected by a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// BGR channel order, ImageNet mean subtracted from 0-255 values.
    Caffe,
    /// Values scaled to [-1, 1].
    Tf,
    /// Values scaled to [0, 1], then ImageNet mean/std per channel.
    Torch,
}

/// A supported pretrained ImageNet network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "densenet")]
    DenseNet,
    #[serde(rename = "inception-v3")]
    InceptionV3,
    #[serde(rename = "mobilenet")]
    MobileNet,
    #[default]
    #[serde(rename = "resnet50")]
    ResNet50,
    #[serde(rename = "vgg16")]
    Vgg16,
    #[serde(rename = "xception")]
    Xception,
}

impl Network {
    /// Every network, in display order.
    pub const ALL: [Network; 6] = [
        Network::DenseNet,
        Network::InceptionV3,
        Network::MobileNet,
        Network::ResNet50,
        Network::Vgg16,
        Network::Xception,
    ];

    /// Identifier used in config files, CLI flags and model filenames.
    pub fn name(self) -> &'static str {
        match self {
            Network::DenseNet => "densenet",
            Network::InceptionV3 => "inception-v3",
            Network::MobileNet => "mobilenet",
            Network::ResNet50 => "resnet50",
            Network::Vgg16 => "vgg16",
            Network::Xception => "xception",
        }
    }

    /// Square input resolution in pixels.
    pub fn input_size(self) -> u32 {
        match self {
            Network::InceptionV3 | Network::Xception => 299,
            _ => 224,
        }
    }

    /// Length of the embedding vector.
    pub fn embedding_dim(self) -> usize {
        match self {
            Network::DenseNet => 1920,
            Network::InceptionV3 => 2048,
            Network::MobileNet => 1000,
            Network::ResNet50 => 2048,
            Network::Vgg16 => 4096,
            Network::Xception => 2048,
        }
    }

    pub fn normalization(self) -> Normalization {
        match self {
            Network::ResNet50 | Network::Vgg16 => Normalization::Caffe,
            Network::DenseNet => Normalization::Torch,
            Network::InceptionV3 | Network::MobileNet | Network::Xception => Normalization::Tf,
        }
    }

    /// Expected ONNX filename inside the model directory.
    pub fn model_filename(self) -> String {
        format!("{}.onnx", self.name())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|n| n.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Network::ALL.iter().map(|n| n.name()).collect();
                format!("unknown network '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_resnet50() {
        let net = Network::default();
        assert_eq!(net, Network::ResNet50);
        assert_eq!(net.embedding_dim(), 2048);
        assert_eq!(net.input_size(), 224);
    }

    #[test]
    fn test_from_str_roundtrips_names() {
        for net in Network::ALL {
            assert_eq!(net.name().parse::<Network>().unwrap(), net);
        }
        assert_eq!("ResNet50".parse::<Network>().unwrap(), Network::ResNet50);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "alexnet".parse::<Network>().unwrap_err();
        assert!(err.contains("alexnet"));
        assert!(err.contains("resnet50"));
    }

    #[test]
    fn test_inception_family_uses_299() {
        assert_eq!(Network::InceptionV3.input_size(), 299);
        assert_eq!(Network::Xception.input_size(), 299);
        assert_eq!(Network::InceptionV3.normalization(), Normalization::Tf);
    }

    #[test]
    fn test_model_filename() {
        assert_eq!(Network::Vgg16.model_filename(), "vgg16.onnx");
    }
}
