//! The sorted corpus: class folders and their centroids.

pub mod centroids;
pub mod discovery;

pub use centroids::{
    build_centroids, BuildProgress, Centroid, CentroidBuilder, CentroidSet, ClassImages,
};
pub use discovery::ImageDiscovery;
