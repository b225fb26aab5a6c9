//! Algorithm collaborator interface.

use std::path::PathBuf;
use std::time::Duration;

use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::PipelineError;

/// Static facts about an algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub name: String,
    /// Native output order already encodes the desired rank; the pipeline
    /// must not re-sort it.
    pub provides_own_ordering: bool,
    /// Accepts a seeded, reduced configuration and can take part in a
    /// stability study.
    pub supports_stability_study: bool,
}

impl AlgorithmDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provides_own_ordering: false,
            supports_stability_study: false,
        }
    }

    pub fn with_own_ordering(mut self, provides_own_ordering: bool) -> Self {
        self.provides_own_ordering = provides_own_ordering;
        self
    }

    pub fn with_stability_study(mut self, supports_stability_study: bool) -> Self {
        self.supports_stability_study = supports_stability_study;
        self
    }
}

/// Everything one run needs. Output paths are chosen by the controller.
pub struct RunRequest<'a> {
    pub dataset: &'a dyn Dataset,
    /// Threshold (u) of this run.
    pub threshold: f64,
    pub timeout: Duration,
    pub boolean_tensor: bool,
    pub experiment_path: PathBuf,
    pub log_path: PathBuf,
    /// Seed of a perturbed stability trial.
    pub seed: Option<u64>,
    /// Initial-pattern cap of a perturbed stability trial.
    pub initial_patterns: Option<usize>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pattern file and the run log are in place.
    Completed {
        experiment_path: PathBuf,
        log_path: PathBuf,
    },
    TimedOut,
}

impl RunOutcome {
    pub fn timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

/// A pattern miner that writes one pattern file per run.
pub trait Algorithm: Send {
    fn descriptor(&self) -> &AlgorithmDescriptor;

    /// Blocks until the run completes or `request.timeout` expires.
    fn run(&mut self, request: &RunRequest<'_>) -> Result<RunOutcome, PipelineError>;

    fn name(&self) -> &str {
        &self.descriptor().name
    }
}
