//! Pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the pipeline controller.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Wall-clock timeout per algorithm run, in seconds. Default: 3600.
    pub timeout_secs: Option<u64>,
    /// Directory of per-dataset configuration files. Default: `configs`.
    pub configs_dir: Option<PathBuf>,
    /// Root of the per-configuration output tree. Default: `iteration`.
    pub output_root: Option<PathBuf>,
    /// Root of post-analysis artifacts. Default: `post_analysis`.
    pub post_analysis_root: Option<PathBuf>,
    /// Delete previous iterations before a session. Default: false.
    pub delete_iterations: Option<bool>,
}

impl PipelineConfig {
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(constants::DEFAULT_TIMEOUT_SECS)
    }

    pub fn effective_configs_dir(&self) -> PathBuf {
        self.configs_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_CONFIGS_DIR))
    }

    pub fn effective_output_root(&self) -> PathBuf {
        self.output_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_ROOT))
    }

    pub fn effective_post_analysis_root(&self) -> PathBuf {
        self.post_analysis_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_POST_ANALYSIS_ROOT))
    }

    pub fn effective_delete_iterations(&self) -> bool {
        self.delete_iterations.unwrap_or(false)
    }
}
