//! Per-class centroid construction.
//!
//! Every image in a class folder is embedded and the embeddings are averaged
//! element-wise into one centroid. Centroids are rebuilt from disk on every
//! run and never persisted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::embedding::Embedder;
use crate::error::{CorpusError, Result};
use crate::math::element_mean;

use super::discovery::ImageDiscovery;

/// Mean embedding of one class.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub vector: Vec<f32>,
    /// Number of images averaged into `vector`
    pub image_count: usize,
}

/// Class name to centroid, iterated in class-name order.
///
/// All centroids share one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentroidSet {
    centroids: BTreeMap<String, Centroid>,
}

impl CentroidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a class centroid.
    pub fn insert(
        &mut self,
        class: impl Into<String>,
        vector: Vec<f32>,
        image_count: usize,
    ) -> std::result::Result<(), CorpusError> {
        let class = class.into();
        if let Some(expected) = self.dimension() {
            if vector.len() != expected {
                return Err(CorpusError::InconsistentDimension {
                    class,
                    expected,
                    actual: vector.len(),
                });
            }
        }
        self.centroids.insert(
            class,
            Centroid {
                vector,
                image_count,
            },
        );
        Ok(())
    }

    /// Average `embeddings` into a centroid for `class`.
    ///
    /// An empty slice adds nothing.
    pub fn insert_mean(
        &mut self,
        class: impl Into<String>,
        embeddings: &[Vec<f32>],
    ) -> std::result::Result<(), CorpusError> {
        let class = class.into();
        let Some(first) = embeddings.first() else {
            return Ok(());
        };
        if let Some(bad) = embeddings.iter().find(|e| e.len() != first.len()) {
            return Err(CorpusError::InconsistentDimension {
                class,
                expected: first.len(),
                actual: bad.len(),
            });
        }
        match element_mean(embeddings) {
            Some(mean) => self.insert(class, mean, embeddings.len()),
            None => Ok(()),
        }
    }

    pub fn get(&self, class: &str) -> Option<&Centroid> {
        self.centroids.get(class)
    }

    /// `(class, centroid vector)` pairs in class-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.centroids
            .iter()
            .map(|(class, c)| (class.as_str(), c.vector.as_slice()))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.centroids.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Centroid)> {
        self.centroids.iter().map(|(class, c)| (class.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Shared vector length, `None` when empty.
    pub fn dimension(&self) -> Option<usize> {
        self.centroids.values().next().map(|c| c.vector.len())
    }

    /// Total images across all classes.
    pub fn image_count(&self) -> usize {
        self.centroids.values().map(|c| c.image_count).sum()
    }
}

/// One step of a centroid build, reported after each image is embedded.
#[derive(Debug, Clone, Copy)]
pub struct BuildProgress<'a> {
    pub class: &'a str,
    pub path: &'a Path,
    pub done: usize,
    pub total: usize,
}

/// Images of one class folder, as found on disk.
#[derive(Debug, Clone)]
pub struct ClassImages {
    pub class: String,
    pub images: Vec<PathBuf>,
}

/// Builds a [`CentroidSet`] from a sorted corpus.
pub struct CentroidBuilder<E> {
    embedder: E,
    discovery: ImageDiscovery,
}

impl<E: Embedder> CentroidBuilder<E> {
    pub fn new(embedder: E, discovery: ImageDiscovery) -> Self {
        Self {
            embedder,
            discovery,
        }
    }

    /// List every class folder with its image files, without embedding.
    pub fn scan(&self, sorted_root: &Path) -> Result<Vec<ClassImages>> {
        let mut classes = Vec::new();
        for class in self.discovery.class_names(sorted_root)? {
            let images = self.discovery.images_in(&sorted_root.join(&class))?;
            classes.push(ClassImages { class, images });
        }
        Ok(classes)
    }

    /// Embed every image and average per class.
    pub fn build(&self, sorted_root: &Path) -> Result<CentroidSet> {
        self.build_with_progress(sorted_root, |_| {})
    }

    /// Same as [`CentroidBuilder::build`], calling `on_image` after each
    /// embedding. The first embedding failure aborts the build.
    pub fn build_with_progress<F>(&self, sorted_root: &Path, mut on_image: F) -> Result<CentroidSet>
    where
        F: FnMut(BuildProgress<'_>),
    {
        let scanned = self.scan(sorted_root)?;
        let total: usize = scanned.iter().map(|c| c.images.len()).sum();
        let mut done = 0;
        let mut centroids = CentroidSet::new();

        for ClassImages { class, images } in &scanned {
            if images.is_empty() {
                tracing::debug!("Class '{}' has no images, skipping", class);
                continue;
            }

            let mut embeddings = Vec::with_capacity(images.len());
            for path in images {
                embeddings.push(self.embedder.embed(path)?);
                done += 1;
                on_image(BuildProgress {
                    class,
                    path,
                    done,
                    total,
                });
            }

            centroids.insert_mean(class.as_str(), &embeddings)?;
            tracing::debug!("Centroid for '{}' from {} images", class, images.len());
        }

        tracing::info!(
            "Built {} centroids from {} images ({} class folders)",
            centroids.len(),
            centroids.image_count(),
            scanned.len()
        );
        Ok(centroids)
    }
}

/// Build centroids for every non-empty class folder under `sorted_root`,
/// recognising the default image extensions.
pub fn build_centroids<E: Embedder>(sorted_root: &Path, embedder: E) -> Result<CentroidSet> {
    CentroidBuilder::new(embedder, ImageDiscovery::default()).build(sorted_root)
}
