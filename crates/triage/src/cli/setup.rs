//! Shared setup for commands that embed images.

use indicatif::{ProgressBar, ProgressStyle};
use triage_core::corpus::BuildProgress;
use triage_core::{CentroidBuilder, CentroidSet, Config, EmbeddingEngine, ImageDiscovery};

/// Validate the effective config and load the embedding model.
pub fn load_engine(config: &Config) -> anyhow::Result<EmbeddingEngine> {
    config.validate()?;

    if !EmbeddingEngine::model_exists(config) {
        anyhow::bail!(
            "No model for {} at {}\n\n  \
             Hint: Export the network to ONNX and place it there, or set \
             `embedding.model_path` in the config. Run `triage models list` to see expected files.",
            EmbeddingEngine::describe(&config.embedding),
            config.model_path().display()
        );
    }

    Ok(EmbeddingEngine::load(config)?)
}

/// Fail early when the sorted corpus folder is missing.
pub fn require_sorted_dir(config: &Config) -> anyhow::Result<()> {
    let sorted = config.sorted_dir();
    if !sorted.is_dir() {
        anyhow::bail!(
            "Sorted folder does not exist: {}\n\n  \
             Hint: Create one subfolder per class under it and add a few example images.",
            sorted.display()
        );
    }
    Ok(())
}

/// Build centroids from the configured sorted corpus with a progress bar.
pub fn build_centroids(config: &Config, engine: &EmbeddingEngine) -> anyhow::Result<CentroidSet> {
    require_sorted_dir(config)?;

    let pb = create_progress_bar();
    let builder = CentroidBuilder::new(engine, ImageDiscovery::new(config.corpus.clone()));
    let result = builder.build_with_progress(&config.sorted_dir(), |step| update(&pb, &step));
    pb.finish_and_clear();

    Ok(result?)
}

/// Progress bar for the centroid build. Length is set on the first step.
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("embedding sorted images...");
    pb
}

/// Advance `pb` for one embedded corpus image.
pub fn update(pb: &ProgressBar, step: &BuildProgress<'_>) {
    pb.set_length(step.total as u64);
    pb.set_position(step.done as u64);
    pb.set_message(step.class.to_string());
}
