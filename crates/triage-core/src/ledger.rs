//! Append-only label ledger.
//!
//! One decision per line: `<filename> <class>`. Lines are never rewritten or
//! deduplicated; when reading, a later line for the same file wins.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Filename to class, as recorded in the ledger.
pub type Labels = BTreeMap<String, String>;

/// The label ledger file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every recorded label. See [`read_labels`].
    pub fn read(&self) -> Labels {
        read_labels(&self.path)
    }

    /// Append one `<filename> <class>` line, creating the file if needed.
    pub fn append(&self, filename: &str, class: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{filename} {class}")?;
        tracing::debug!("Ledger += {} {}", filename, class);
        Ok(())
    }
}

/// Read a ledger into a filename → class map.
///
/// A missing or unreadable file is reported and treated as empty. Lines with
/// fewer than two whitespace-separated tokens are skipped; tokens after the
/// second are ignored.
pub fn read_labels(path: &Path) -> Labels {
    let mut labels = Labels::new();

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Label file {} not found, starting empty", path.display());
            return labels;
        }
        Err(e) => {
            tracing::warn!("Could not read label file {}: {}", path.display(), e);
            return labels;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Stopped reading label file {}: {}", path.display(), e);
                break;
            }
        };
        let mut parts = line.split_whitespace();
        if let (Some(filename), Some(class)) = (parts.next(), parts.next()) {
            labels.insert(filename.to_string(), class.to_string());
        }
    }

    labels
}
