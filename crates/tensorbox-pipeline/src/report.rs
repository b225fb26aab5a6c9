//! Serializable record of what a session did.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tensorbox_core::errors::PipelineError;

/// Stage reached by one (configuration, iteration, algorithm) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Pending,
    DatasetBuilt,
    Translated,
    AlgorithmRunning,
    Completed,
    TimedOut,
    PostProcessed,
}

impl RunStage {
    /// Legal successors; `Completed` and `TimedOut` are the two outcomes of a
    /// running algorithm.
    pub fn can_advance_to(self, next: RunStage) -> bool {
        use RunStage::*;
        matches!(
            (self, next),
            (Pending, DatasetBuilt)
                | (DatasetBuilt, Translated)
                | (Translated, AlgorithmRunning)
                | (AlgorithmRunning, Completed)
                | (AlgorithmRunning, TimedOut)
                | (Completed, PostProcessed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::TimedOut | RunStage::PostProcessed)
    }
}

/// One algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub configuration: String,
    /// `u<threshold>` or a stability trial folder name.
    pub iteration: String,
    pub algorithm: String,
    pub threshold: f64,
    /// Every stage visited, in order.
    pub stages: Vec<RunStage>,
    /// Recoverable problems, one line each.
    pub notices: Vec<String>,
}

impl RunRecord {
    pub fn new(configuration: &str, iteration: String, algorithm: &str, threshold: f64) -> Self {
        Self {
            configuration: configuration.to_string(),
            iteration,
            algorithm: algorithm.to_string(),
            threshold,
            stages: vec![RunStage::Pending],
            notices: Vec::new(),
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stages.last().copied().unwrap_or(RunStage::Pending)
    }

    /// Moves to `next`. Illegal transitions are ignored and reported.
    pub fn advance(&mut self, next: RunStage) -> bool {
        if self.stage().can_advance_to(next) {
            self.stages.push(next);
            true
        } else {
            self.notices
                .push(format!("illegal transition {:?} -> {next:?}", self.stage()));
            false
        }
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }
}

/// Stability study outcome for one algorithm of one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityRecord {
    pub configuration: String,
    pub algorithm: String,
    /// Trials that produced a usable pattern file.
    pub trials: usize,
    pub ground_patterns: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Everything a session did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub configurations: Vec<String>,
    pub runs: Vec<RunRecord>,
    pub stability: Vec<StabilityRecord>,
}

impl SessionReport {
    pub fn runs_for<'a>(&'a self, configuration: &'a str) -> impl Iterator<Item = &'a RunRecord> + 'a {
        self.runs.iter().filter(move |run| run.configuration == configuration)
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(self).map_err(|e| PipelineError::Serialization(e.to_string()))
    }

    pub fn write_json(&self, path: &Path) -> Result<(), PipelineError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| PipelineError::io(path, &e))
    }
}
