//! Top-level tensorbox configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PipelineConfig, QualityConfig, StabilityConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TENSORBOX_*`)
/// 3. Project config (`tensorbox.toml` in project root)
/// 4. User config (`~/.tensorbox/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TensorboxConfig {
    pub pipeline: PipelineConfig,
    pub quality: QualityConfig,
    pub stability: StabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub timeout_secs: Option<u64>,
    pub output_root: Option<PathBuf>,
    pub max_patterns: Option<usize>,
    pub trials: Option<usize>,
    pub delete_iterations: Option<bool>,
}

impl TensorboxConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TensorboxConfig) -> Result<(), ConfigError> {
        if config.pipeline.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pipeline.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.quality.max_patterns == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "quality.max_patterns".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.stability.trials == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "stability.trials".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.tensorbox/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut TensorboxConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TensorboxConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut TensorboxConfig, other: &TensorboxConfig) {
        // Pipeline
        if other.pipeline.timeout_secs.is_some() {
            base.pipeline.timeout_secs = other.pipeline.timeout_secs;
        }
        if other.pipeline.configs_dir.is_some() {
            base.pipeline.configs_dir = other.pipeline.configs_dir.clone();
        }
        if other.pipeline.output_root.is_some() {
            base.pipeline.output_root = other.pipeline.output_root.clone();
        }
        if other.pipeline.post_analysis_root.is_some() {
            base.pipeline.post_analysis_root = other.pipeline.post_analysis_root.clone();
        }
        if other.pipeline.delete_iterations.is_some() {
            base.pipeline.delete_iterations = other.pipeline.delete_iterations;
        }

        // Quality
        if other.quality.max_patterns.is_some() {
            base.quality.max_patterns = other.quality.max_patterns;
        }
        if other.quality.include_empty_model.is_some() {
            base.quality.include_empty_model = other.quality.include_empty_model;
        }

        // Stability
        if other.stability.trials.is_some() {
            base.stability.trials = other.stability.trials;
        }
        if other.stability.initial_patterns.is_some() {
            base.stability.initial_patterns = other.stability.initial_patterns;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TENSORBOX_TIMEOUT_SECS`, `TENSORBOX_MAX_PATTERNS`, etc.
    fn apply_env_overrides(config: &mut TensorboxConfig) {
        if let Ok(val) = std::env::var("TENSORBOX_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.pipeline.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENSORBOX_OUTPUT_ROOT") {
            config.pipeline.output_root = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("TENSORBOX_DELETE_ITERATIONS") {
            if let Ok(v) = val.parse::<bool>() {
                config.pipeline.delete_iterations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENSORBOX_MAX_PATTERNS") {
            if let Ok(v) = val.parse::<usize>() {
                config.quality.max_patterns = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TENSORBOX_STABILITY_TRIALS") {
            if let Ok(v) = val.parse::<usize>() {
                config.stability.trials = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TensorboxConfig, cli: &CliOverrides) {
        if let Some(v) = cli.timeout_secs {
            config.pipeline.timeout_secs = Some(v);
        }
        if let Some(ref v) = cli.output_root {
            config.pipeline.output_root = Some(v.clone());
        }
        if let Some(v) = cli.max_patterns {
            config.quality.max_patterns = Some(v);
        }
        if let Some(v) = cli.trials {
            config.stability.trials = Some(v);
        }
        if let Some(v) = cli.delete_iterations {
            config.pipeline.delete_iterations = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.tensorbox/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".tensorbox"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
