//! Stability study configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for repeated-trial stability studies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StabilityConfig {
    /// Number of perturbed trials. Default: 30.
    pub trials: Option<usize>,
    /// Initial-pattern cap handed to the miner in perturbed trials. Default: 1000.
    pub initial_patterns: Option<usize>,
}

impl StabilityConfig {
    pub fn effective_trials(&self) -> usize {
        self.trials.unwrap_or(constants::DEFAULT_STABILITY_TRIALS)
    }

    pub fn effective_initial_patterns(&self) -> usize {
        self.initial_patterns
            .unwrap_or(constants::DEFAULT_INITIAL_PATTERNS)
    }
}
