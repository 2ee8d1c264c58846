//! File discovery for the sorted and unsorted corpora.
//!
//! Both corpora are flat: classes are the immediate subdirectories of the
//! sorted root and images sit directly inside a class or the unsorted pool.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::error::CorpusError;

/// Finds image files and class directories.
#[derive(Debug, Clone)]
pub struct ImageDiscovery {
    config: CorpusConfig,
}

impl Default for ImageDiscovery {
    fn default() -> Self {
        Self::new(CorpusConfig::default())
    }
}

impl ImageDiscovery {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Image files directly inside `dir`, sorted by file name.
    pub fn images_in(&self, dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
        let files = self
            .children(dir)?
            .into_iter()
            .filter(|p| p.is_file() && self.is_supported(p))
            .collect();
        Ok(files)
    }

    /// Names of the immediate subdirectories of `sorted_root`, sorted.
    pub fn class_names(&self, sorted_root: &Path) -> Result<Vec<String>, CorpusError> {
        let names = self
            .children(sorted_root)?
            .into_iter()
            .filter(|p| p.is_dir())
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect();
        Ok(names)
    }

    /// Check if a file has a supported extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    fn children(&self, dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
        if !dir.is_dir() {
            return Err(CorpusError::MissingDirectory(dir.to_path_buf()));
        }

        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry.map(|e| e.into_path()).map_err(|e| CorpusError::Unreadable {
                    path: e.path().unwrap_or(dir).to_path_buf(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}
