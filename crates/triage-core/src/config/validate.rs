//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "corpus.supported_formats must not be empty".into(),
            ));
        }
        if self
            .corpus
            .supported_formats
            .iter()
            .any(|f| f.trim().is_empty() || f.starts_with('.'))
        {
            return Err(ConfigError::ValidationError(
                "corpus.supported_formats entries must be bare extensions like \"jpg\"".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.paths.unsorted == self.paths.sorted {
            return Err(ConfigError::ValidationError(
                "paths.unsorted and paths.sorted must differ".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}
