//! Persisting a triage decision.
//!
//! A decision is two independent effects, in this order: a ledger line is
//! appended, then the image is moved from the unsorted pool into its class
//! folder. They are not atomic. If the process dies between them the ledger
//! is ahead of the filesystem and a later run does not reconcile the two.

use std::path::{Path, PathBuf};

use crate::error::{CorpusError, Result};
use crate::ledger::Ledger;

/// Check that a new class `name` can serve as a class folder and a ledger
/// token.
pub fn validate_class_name(name: &str) -> std::result::Result<(), CorpusError> {
    if name.chars().any(char::is_whitespace) {
        return Err(invalid_class(name, "must not contain whitespace"));
    }
    check_folder_name(name)
}

/// Check that `name` stays a single folder directly under the sorted root.
///
/// Looser than [`validate_class_name`]: folders already on disk may contain
/// whitespace.
fn check_folder_name(name: &str) -> std::result::Result<(), CorpusError> {
    if name.is_empty() {
        return Err(invalid_class(name, "must not be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid_class(name, "must not contain path separators"));
    }
    if name == "." || name == ".." {
        return Err(invalid_class(name, "must not be a relative directory marker"));
    }
    Ok(())
}

fn invalid_class(name: &str, reason: &str) -> CorpusError {
    CorpusError::InvalidClassName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Appends ledger lines and moves images into class folders.
#[derive(Debug, Clone)]
pub struct DecisionRecorder {
    ledger: Ledger,
    unsorted_dir: PathBuf,
    sorted_dir: PathBuf,
}

impl DecisionRecorder {
    pub fn new(ledger: Ledger, unsorted_dir: PathBuf, sorted_dir: PathBuf) -> Self {
        Self {
            ledger,
            unsorted_dir,
            sorted_dir,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Where `filename` would land in `class`.
    pub fn destination(&self, filename: &str, class: &str) -> PathBuf {
        self.sorted_dir.join(class).join(filename)
    }

    /// Record `filename` as `class` and move it into the class folder,
    /// creating the folder if needed. Returns the new path.
    ///
    /// `class` may be any existing class folder name. Nothing is written when
    /// the source is missing or the destination already exists.
    pub fn record(&self, filename: &str, class: &str) -> Result<PathBuf> {
        check_folder_name(class)?;

        let source = self.unsorted_dir.join(filename);
        if !is_plain_file_name(filename) || !source.is_file() {
            return Err(CorpusError::MissingImage(source).into());
        }

        let class_dir = self.sorted_dir.join(class);
        let target = class_dir.join(filename);
        if target.exists() {
            return Err(CorpusError::DestinationExists(target).into());
        }

        for token in [filename, class] {
            if token.chars().any(char::is_whitespace) {
                tracing::warn!(
                    "'{}' contains whitespace; its ledger line will not read back correctly",
                    token
                );
            }
        }

        std::fs::create_dir_all(&class_dir)?;
        self.ledger.append(filename, class)?;
        std::fs::rename(&source, &target)?;

        tracing::info!("{} -> {}", filename, class);
        Ok(target)
    }
}

fn is_plain_file_name(filename: &str) -> bool {
    Path::new(filename).file_name().and_then(|n| n.to_str()) == Some(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriageError;
    use std::fs;

    struct Layout {
        dir: tempfile::TempDir,
    }

    impl Layout {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("images/unsorted")).unwrap();
            fs::create_dir_all(dir.path().join("images/sorted/cat")).unwrap();
            Self { dir }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn recorder(&self) -> DecisionRecorder {
            DecisionRecorder::new(
                Ledger::new(self.root().join("labels.txt")),
                self.root().join("images/unsorted"),
                self.root().join("images/sorted"),
            )
        }

        fn add_unsorted(&self, name: &str) {
            fs::write(self.root().join("images/unsorted").join(name), b"pixels").unwrap();
        }

        fn ledger_text(&self) -> String {
            fs::read_to_string(self.root().join("labels.txt")).unwrap_or_default()
        }
    }

    #[test]
    fn test_record_appends_and_moves() {
        let layout = Layout::new();
        layout.add_unsorted("img1.jpg");

        let target = layout.recorder().record("img1.jpg", "cat").unwrap();

        assert_eq!(target, layout.root().join("images/sorted/cat/img1.jpg"));
        assert_eq!(layout.ledger_text(), "img1.jpg cat\n");
        assert!(target.exists());
        assert!(!layout.root().join("images/unsorted/img1.jpg").exists());
    }

    #[test]
    fn test_record_creates_class_folder() {
        let layout = Layout::new();
        layout.add_unsorted("img2.png");

        layout.recorder().record("img2.png", "bird").unwrap();

        assert!(layout.root().join("images/sorted/bird").is_dir());
        assert!(layout.root().join("images/sorted/bird/img2.png").exists());
        assert_eq!(layout.ledger_text(), "img2.png bird\n");
    }

    #[test]
    fn test_existing_destination_writes_nothing() {
        let layout = Layout::new();
        layout.add_unsorted("img1.jpg");
        fs::write(layout.root().join("images/sorted/cat/img1.jpg"), b"older").unwrap();

        let err = layout.recorder().record("img1.jpg", "cat").unwrap_err();

        assert!(matches!(
            err,
            TriageError::Corpus(CorpusError::DestinationExists(_))
        ));
        assert_eq!(layout.ledger_text(), "");
        assert!(layout.root().join("images/unsorted/img1.jpg").exists());
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let layout = Layout::new();
        let err = layout.recorder().record("ghost.jpg", "cat").unwrap_err();
        assert!(matches!(
            err,
            TriageError::Corpus(CorpusError::MissingImage(_))
        ));
        assert_eq!(layout.ledger_text(), "");
    }

    #[test]
    fn test_rejects_path_like_filename() {
        let layout = Layout::new();
        let err = layout.recorder().record("../labels.txt", "cat").unwrap_err();
        assert!(matches!(
            err,
            TriageError::Corpus(CorpusError::MissingImage(_))
        ));
    }

    #[test]
    fn test_existing_class_folder_with_space() {
        let layout = Layout::new();
        fs::create_dir_all(layout.root().join("images/sorted/sea bird")).unwrap();
        layout.add_unsorted("a.jpg");

        let target = layout.recorder().record("a.jpg", "sea bird").unwrap();

        assert_eq!(target, layout.root().join("images/sorted/sea bird/a.jpg"));
        assert!(target.exists());
        assert_eq!(layout.ledger_text(), "a.jpg sea bird\n");
    }

    #[test]
    fn test_rejects_class_outside_sorted_root() {
        let layout = Layout::new();
        layout.add_unsorted("a.jpg");

        for class in ["", "..", "../escape", "a/b"] {
            let err = layout.recorder().record("a.jpg", class).unwrap_err();
            assert!(matches!(
                err,
                TriageError::Corpus(CorpusError::InvalidClassName { .. })
            ));
        }
        assert_eq!(layout.ledger_text(), "");
        assert!(layout.root().join("images/unsorted/a.jpg").exists());
    }

    #[test]
    fn test_validate_class_name() {
        assert!(validate_class_name("bird").is_ok());
        assert!(validate_class_name("sea_bird-2").is_ok());
        assert!(validate_class_name("").is_err());
        assert!(validate_class_name("sea bird").is_err());
        assert!(validate_class_name("a/b").is_err());
        assert!(validate_class_name("a\\b").is_err());
        assert!(validate_class_name("..").is_err());
    }
}
