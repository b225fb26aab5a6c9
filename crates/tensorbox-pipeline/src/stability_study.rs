//! Repeated-trial stability study driver.
//!
//! Trial 0 (`ground_patterns`) runs every participating algorithm with the
//! full configuration. Trials `1..=N` run it with the configured
//! initial-pattern cap and the trial number as seed. The decoded pattern
//! files are then re-encoded and compared against the ground trial.

use tensorbox_analysis::stability::StabilityAnalyzer;
use tensorbox_core::errors::PipelineError;
use tensorbox_core::pattern::Experiment;
use tensorbox_core::tracing::metrics;
use tracing::{info, warn};

use crate::context::SessionContext;
use crate::controller::{PipelineController, RunPlan};
use crate::decode::decode_tuples;
use crate::layout::Trial;
use crate::report::{SessionReport, StabilityRecord};

/// Trial count and initial-pattern cap of one study.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudySettings {
    pub trials: u64,
    pub initial_patterns: usize,
}

impl StudySettings {
    /// Configuration-level values win over the session-level `[stability]`.
    pub fn resolve(context: &SessionContext, controller: &PipelineController) -> Self {
        let session = &controller.config().stability;
        let local = context.configuration.stability.clone().unwrap_or_default();
        Self {
            trials: local.trials.unwrap_or_else(|| session.effective_trials()) as u64,
            initial_patterns: local
                .initial_patterns
                .unwrap_or_else(|| session.effective_initial_patterns()),
        }
    }
}

impl PipelineController {
    /// Mines every trial, then analyses each participating algorithm.
    pub(crate) fn run_stability_study(
        &mut self,
        context: &SessionContext,
        report: &mut SessionReport,
    ) -> Result<(), PipelineError> {
        let name = context.name();
        let settings = StudySettings::resolve(context, self);
        let threshold = context.configuration.thresholds.first().copied().unwrap_or(0.0);

        let participants: Vec<usize> = (0..self.algorithms.len())
            .filter(|&i| {
                let algorithm = &self.algorithms[i];
                algorithm.descriptor().supports_stability_study
                    && !self.timeouts.has_timed_out(algorithm.name(), threshold)
            })
            .collect();
        if participants.is_empty() {
            info!({ metrics::CONFIGURATION } = name, "no algorithm takes part in the stability study");
            return Ok(());
        }

        info!(
            { metrics::CONFIGURATION } = name,
            { metrics::TRIALS } = settings.trials,
            "initiating stability study"
        );
        let study_dir = self.layout.random_study_dir(name);
        self.workspace.remove(&study_dir)?;
        self.workspace.create_dir(&study_dir)?;

        for number in 0..=settings.trials {
            let trial = if number == 0 {
                Trial::Ground
            } else {
                Trial::Perturbed(number)
            };
            let dir = self.layout.trial_dir(name, trial);
            self.layout.prepare_run_dirs(self.workspace.as_ref(), &dir)?;

            for &index in &participants {
                let algorithm = self.algorithms[index].name().to_string();
                let (seed, initial_patterns) = match trial {
                    Trial::Ground => (None, None),
                    Trial::Perturbed(n) => (Some(n), Some(settings.initial_patterns)),
                };
                let plan = RunPlan {
                    iteration: trial.folder_name(),
                    threshold,
                    experiment_path: self.layout.trial_experiment_path(name, trial, &algorithm),
                    log_path: self.layout.trial_log_path(name, trial, &algorithm),
                    seed,
                    initial_patterns,
                    marks_timeouts: false,
                };
                let record = self.run_algorithm(context, index, &plan);
                report.runs.push(record);
            }
        }

        for &index in &participants {
            let algorithm = self.algorithms[index].name().to_string();
            match self.analyse_stability(context, &algorithm, settings.trials) {
                Ok(record) => report.stability.push(record),
                Err(e) => warn!(
                    { metrics::CONFIGURATION } = name,
                    { metrics::ALGORITHM } = algorithm.as_str(),
                    error = %e,
                    "stability analysis skipped"
                ),
            }
        }
        Ok(())
    }

    /// Loads the ground and trial pattern files of `algorithm`, scores them
    /// and writes both artifacts.
    fn analyse_stability(
        &self,
        context: &SessionContext,
        algorithm: &str,
        trials: u64,
    ) -> Result<StabilityRecord, PipelineError> {
        let name = context.name();
        let rank = context.rank();
        let dataset = context.dataset.as_ref();

        let ground_path = self.layout.trial_experiment_path(name, Trial::Ground, algorithm);
        let ground = Experiment::load_mapped(&ground_path, rank, |line| dataset.encode_pattern(line))?
            .into_data();

        let mut experiments = Vec::with_capacity(trials as usize);
        for number in 1..=trials {
            let path = self
                .layout
                .trial_experiment_path(name, Trial::Perturbed(number), algorithm);
            if !path.exists() {
                info!(trial = number, "trial produced no pattern file, skipped");
                continue;
            }
            match Experiment::load_mapped(&path, rank, |line| dataset.encode_pattern(line)) {
                Ok(loaded) => experiments.push(loaded.into_data()),
                Err(e) => warn!(trial = number, error = %e, "trial skipped"),
            }
        }

        let mut stability = StabilityAnalyzer::new(&ground).analyze(&experiments)?;
        stability.relabel(|tuples| decode_tuples(dataset, tuples))?;
        stability.write_artifacts(&self.layout.stability_results_dir(algorithm))?;

        let summary = stability.summary();
        Ok(StabilityRecord {
            configuration: name.to_string(),
            algorithm: algorithm.to_string(),
            trials: experiments.len(),
            ground_patterns: ground.len(),
            mean: summary.map(|s| s.mean),
            std_dev: summary.map(|s| s.std_dev),
        })
    }
}
