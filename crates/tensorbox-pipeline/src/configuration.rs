//! Per-dataset configuration files.
//!
//! A configuration directory holds one TOML file per dataset run, processed
//! in file-name order. Files with the `off` extension are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tensorbox_core::config::StabilityConfig;
use tensorbox_core::constants::DISABLED_CONFIG_EXTENSION;
use tensorbox_core::errors::{ConfigError, PipelineError};
use tracing::info;

/// One dataset configuration.
///
/// ```toml
/// configuration_name = "school"
/// timeout_secs = 600
/// boolean_tensor = true
/// thresholds = [0.0]
///
/// [stability]
/// trials = 30
/// initial_patterns = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfiguration {
    pub configuration_name: String,
    /// Overrides `pipeline.timeout_secs` for this configuration.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub boolean_tensor: bool,
    /// Increasing thresholds (u) to run every algorithm at.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f64>,
    /// Present when this configuration runs a stability study.
    #[serde(default)]
    pub stability: Option<StabilityConfig>,
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_thresholds() -> Vec<f64> {
    vec![0.0]
}

impl DatasetConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            configuration_name: name.into(),
            timeout_secs: None,
            boolean_tensor: false,
            thresholds: default_thresholds(),
            stability: None,
            source: None,
        }
    }

    pub fn from_toml(text: &str, source: &Path) -> Result<Self, ConfigError> {
        let mut configuration: Self = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: source.display().to_string(),
            message: e.to_string(),
        })?;
        configuration.validate(source)?;
        configuration.source = Some(source.to_path_buf());
        Ok(configuration)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    fn validate(&self, source: &Path) -> Result<(), ConfigError> {
        let invalid = |field: &str, message: &str| ConfigError::ValidationFailed {
            field: format!("{}:{field}", source.display()),
            message: message.to_string(),
        };
        if self.configuration_name.trim().is_empty() {
            return Err(invalid("configuration_name", "must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", "must be greater than 0"));
        }
        if self.thresholds.iter().any(|u| !u.is_finite()) {
            return Err(invalid("thresholds", "must be finite"));
        }
        if self.thresholds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(invalid("thresholds", "must be strictly increasing"));
        }
        if self.stability.as_ref().is_some_and(|s| s.trials == Some(0)) {
            return Err(invalid("stability.trials", "must be greater than 0"));
        }
        Ok(())
    }
}

/// Lists the enabled configuration files of `dir` in name order.
pub fn list_configuration_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, &e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, &e))?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == DISABLED_CONFIG_EXTENSION) {
            info!(path = %path.display(), "skipping disabled configuration");
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Loads every enabled configuration of `dir` in name order.
pub fn load_configurations(dir: &Path) -> Result<Vec<DatasetConfiguration>, PipelineError> {
    list_configuration_files(dir)?
        .iter()
        .map(|path| DatasetConfiguration::load(path).map_err(PipelineError::from))
        .collect()
}
