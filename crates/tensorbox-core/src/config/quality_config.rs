//! RSS evaluation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the quality (RSS evolution) evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QualityConfig {
    /// Maximum number of patterns folded into the curve. Default: 20.
    pub max_patterns: Option<usize>,
    /// Prepend the empty-model point `(empty_model_rss, 0)`. Default: false.
    pub include_empty_model: Option<bool>,
}

impl QualityConfig {
    pub fn effective_max_patterns(&self) -> usize {
        self.max_patterns.unwrap_or(constants::DEFAULT_MAX_PATTERNS)
    }

    pub fn effective_include_empty_model(&self) -> bool {
        self.include_empty_model.unwrap_or(false)
    }
}
