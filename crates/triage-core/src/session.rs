//! One triage session: fixed centroids, a growing class list, and the
//! unsorted pool processed one image at a time.

use std::path::{Path, PathBuf};

use crate::classify::{classify, rank, Prediction};
use crate::config::Config;
use crate::corpus::{CentroidBuilder, CentroidSet, ImageDiscovery};
use crate::embedding::Embedder;
use crate::error::{ClassifyError, Result};
use crate::ledger::Ledger;
use crate::recorder::{validate_class_name, DecisionRecorder};

/// Session state shared by the interactive loop and batch commands.
pub struct TriageSession<E> {
    embedder: E,
    centroids: CentroidSet,
    classes: Vec<String>,
    discovery: ImageDiscovery,
    unsorted_dir: PathBuf,
    recorder: DecisionRecorder,
}

impl<E: Embedder> TriageSession<E> {
    /// Assemble a session from already-built parts.
    ///
    /// Fails with [`ClassifyError::NoCentroids`] when `centroids` is empty,
    /// since no image could be classified.
    pub fn new(
        embedder: E,
        centroids: CentroidSet,
        classes: Vec<String>,
        discovery: ImageDiscovery,
        unsorted_dir: PathBuf,
        recorder: DecisionRecorder,
    ) -> Result<Self> {
        if centroids.is_empty() {
            return Err(ClassifyError::NoCentroids.into());
        }
        Ok(Self {
            embedder,
            centroids,
            classes,
            discovery,
            unsorted_dir,
            recorder,
        })
    }

    /// Build centroids from the configured sorted corpus and start a session.
    ///
    /// `on_image` is called after each corpus image is embedded.
    pub fn open<F>(config: &Config, embedder: E, on_image: F) -> Result<Self>
    where
        F: FnMut(crate::corpus::BuildProgress<'_>),
    {
        let discovery = ImageDiscovery::new(config.corpus.clone());
        let sorted_dir = config.sorted_dir();
        let unsorted_dir = config.unsorted_dir();

        let centroids = CentroidBuilder::new(&embedder, discovery.clone())
            .build_with_progress(&sorted_dir, on_image)?;
        let classes = discovery.class_names(&sorted_dir)?;

        let recorder = DecisionRecorder::new(
            Ledger::new(config.labels_path()),
            unsorted_dir.clone(),
            sorted_dir,
        );

        Self::new(embedder, centroids, classes, discovery, unsorted_dir, recorder)
    }

    pub fn centroids(&self) -> &CentroidSet {
        &self.centroids
    }

    /// Classes offered when correcting a prediction.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn ledger(&self) -> &Ledger {
        self.recorder.ledger()
    }

    pub fn unsorted_dir(&self) -> &Path {
        &self.unsorted_dir
    }

    /// Images still waiting in the unsorted pool, by file name.
    pub fn pending(&self) -> Result<Vec<PathBuf>> {
        Ok(self.discovery.images_in(&self.unsorted_dir)?)
    }

    /// Embed `path` and pick the nearest centroid.
    pub fn predict(&self, path: &Path) -> Result<Prediction> {
        let embedding = self.embedder.embed(path)?;
        Ok(classify(&embedding, &self.centroids)?)
    }

    /// Embed `path` and rank every class, closest first.
    pub fn rank(&self, path: &Path) -> Result<Vec<Prediction>> {
        let embedding = self.embedder.embed(path)?;
        Ok(rank(&embedding, &self.centroids)?)
    }

    /// Offer a new class for the rest of the session.
    ///
    /// Centroids are not touched; a new class only gets one on the next run.
    pub fn add_class(&mut self, name: &str) -> Result<&str> {
        let name = name.trim();
        validate_class_name(name)?;

        let index = match self.classes.iter().position(|c| c == name) {
            Some(index) => index,
            None => {
                tracing::debug!("New class '{}'", name);
                self.classes.push(name.to_string());
                self.classes.len() - 1
            }
        };
        Ok(self.classes[index].as_str())
    }

    /// Persist the decision for the image called `filename`.
    pub fn record(&self, filename: &str, class: &str) -> Result<PathBuf> {
        self.recorder.record(filename, class)
    }
}
