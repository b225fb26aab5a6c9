//! PipelineController: the per-configuration state machine.
//!
//! ```text
//! Pending -> DatasetBuilt -> Translated -> AlgorithmRunning -> Completed -> PostProcessed
//!                                                          \-> TimedOut
//! ```
//!
//! Dataset-build failures and unknown configuration names abort the session.
//! Everything else (timeouts, miner failures, malformed pattern files) is
//! local to one algorithm run and recorded in the [`SessionReport`].

use std::fs;
use std::path::{Path, PathBuf};

use tensorbox_core::config::TensorboxConfig;
use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::PipelineError;
use tensorbox_core::pattern::Experiment;
use tensorbox_core::tracing::metrics;
use tracing::{error, info, warn};

use crate::algorithm::{Algorithm, AlgorithmDescriptor, RunOutcome, RunRequest};
use crate::configuration::{load_configurations, DatasetConfiguration};
use crate::context::SessionContext;
use crate::decode::decode_experiment_text;
use crate::layout::{FsWorkspace, OutputLayout, Workspace};
use crate::provider::DatasetProvider;
use crate::report::{RunRecord, RunStage, SessionReport};
use crate::run_log::RunLog;
use crate::timeouts::TimeoutBook;
use crate::translator::{Translator, TranslatorRegistry};

/// Where one algorithm run writes and with which trial parameters.
#[derive(Debug, Clone)]
pub(crate) struct RunPlan {
    pub iteration: String,
    pub threshold: f64,
    pub experiment_path: PathBuf,
    pub log_path: PathBuf,
    pub seed: Option<u64>,
    pub initial_patterns: Option<usize>,
    /// Whether a timeout blocks this algorithm at this threshold.
    pub marks_timeouts: bool,
}

pub struct PipelineController {
    pub(crate) config: TensorboxConfig,
    pub(crate) layout: OutputLayout,
    pub(crate) workspace: Box<dyn Workspace>,
    provider: Box<dyn DatasetProvider>,
    translators: TranslatorRegistry,
    pub(crate) algorithms: Vec<Box<dyn Algorithm>>,
    pub(crate) timeouts: TimeoutBook,
    datasets_built: bool,
}

impl PipelineController {
    pub fn new(config: TensorboxConfig, provider: Box<dyn DatasetProvider>) -> Self {
        let layout = OutputLayout::from_config(&config);
        Self {
            config,
            layout,
            workspace: Box::new(FsWorkspace),
            provider,
            translators: TranslatorRegistry::new(),
            algorithms: Vec::new(),
            timeouts: TimeoutBook::new(),
            datasets_built: false,
        }
    }

    pub fn with_workspace(mut self, workspace: Box<dyn Workspace>) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn config(&self) -> &TensorboxConfig {
        &self.config
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn timeouts(&self) -> &TimeoutBook {
        &self.timeouts
    }

    /// Registers `algorithm` unless one with the same name already is.
    /// Returns whether it was added.
    pub fn register_algorithm(&mut self, algorithm: Box<dyn Algorithm>) -> bool {
        if self.algorithms.iter().any(|a| a.name() == algorithm.name()) {
            return false;
        }
        self.algorithms.push(algorithm);
        true
    }

    pub fn register_translator(&mut self, rank: usize, translator: Box<dyn Translator>) {
        self.translators.register(rank, translator);
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.algorithms.iter().map(|a| a.descriptor())
    }

    /// Builds the datasets from raw data, once per controller. Returns
    /// whether this call did the build.
    pub fn build_datasets(&mut self) -> Result<bool, PipelineError> {
        if self.datasets_built {
            return Ok(false);
        }
        self.provider.build()?;
        self.datasets_built = true;
        Ok(true)
    }

    /// Runs every enabled configuration of `pipeline.configs_dir`.
    pub fn initiate_session(&mut self) -> Result<SessionReport, PipelineError> {
        if self.config.pipeline.effective_delete_iterations() {
            info!(path = %self.layout.output_root().display(), "deleting previous iterations");
            self.workspace.remove(self.layout.output_root())?;
        }
        let configs_dir = self.config.pipeline.effective_configs_dir();
        let configurations = load_configurations(&configs_dir).map_err(|e| {
            error!(path = %configs_dir.display(), error = %e, "cannot read configurations, aborting session");
            e
        })?;
        self.run_configurations(&configurations)
    }

    pub fn run_configurations(
        &mut self,
        configurations: &[DatasetConfiguration],
    ) -> Result<SessionReport, PipelineError> {
        let mut report = SessionReport::default();
        for configuration in configurations {
            self.run_configuration(configuration, &mut report)?;
        }
        Ok(report)
    }

    /// Runs one configuration: every algorithm at every threshold, then the
    /// stability study when the configuration asks for one.
    pub fn run_configuration(
        &mut self,
        configuration: &DatasetConfiguration,
        report: &mut SessionReport,
    ) -> Result<(), PipelineError> {
        let name = configuration.configuration_name.as_str();
        info!({ metrics::CONFIGURATION } = name, "starting configuration");

        self.build_datasets().map_err(|e| fatal(e, name))?;
        let dataset = self.provider.dataset(configuration).map_err(|e| fatal(e, name))?;
        let context = SessionContext::new(configuration.clone(), dataset, &self.config);

        self.translators
            .translate(context.dataset.as_ref())
            .map_err(|e| fatal(PipelineError::DatasetBuild(format!("translation failed: {e}")), name))?;

        self.timeouts.reset();
        report.configurations.push(name.to_string());

        for &threshold in &configuration.thresholds {
            let dir = self.layout.threshold_dir(name, threshold);
            self.layout
                .prepare_run_dirs(self.workspace.as_ref(), &dir)
                .map_err(|e| fatal(e, name))?;

            for index in 0..self.algorithms.len() {
                let algorithm = self.algorithms[index].name().to_string();
                if self.timeouts.has_timed_out(&algorithm, threshold) {
                    info!(%algorithm, threshold, "skipping, timed out at this threshold");
                    continue;
                }
                let plan = RunPlan {
                    iteration: OutputLayout::threshold_name(threshold),
                    threshold,
                    experiment_path: self.layout.experiment_path(name, threshold, &algorithm),
                    log_path: self.layout.log_path(name, threshold, &algorithm),
                    seed: None,
                    initial_patterns: None,
                    marks_timeouts: true,
                };
                let record = self.run_algorithm(&context, index, &plan);
                report.runs.push(record);
            }
        }

        if configuration.stability.is_some() {
            if let Err(e) = self.run_stability_study(&context, report) {
                if e.is_fatal() {
                    return Err(fatal(e, name));
                }
                warn!({ metrics::CONFIGURATION } = name, error = %e, "stability study aborted");
            }
        }
        Ok(())
    }

    /// Runs one algorithm and post-processes its output. Never fails: every
    /// problem ends up as a notice on the returned record.
    pub(crate) fn run_algorithm(
        &mut self,
        context: &SessionContext,
        index: usize,
        plan: &RunPlan,
    ) -> RunRecord {
        let descriptor = self.algorithms[index].descriptor().clone();
        let mut record = RunRecord::new(context.name(), plan.iteration.clone(), &descriptor.name, plan.threshold);
        record.advance(RunStage::DatasetBuilt);
        record.advance(RunStage::Translated);
        record.advance(RunStage::AlgorithmRunning);

        info!(
            { metrics::CONFIGURATION } = context.name(),
            { metrics::ALGORITHM } = descriptor.name.as_str(),
            { metrics::THRESHOLD } = plan.threshold,
            iteration = %plan.iteration,
            "running algorithm"
        );
        let request = RunRequest {
            dataset: context.dataset.as_ref(),
            threshold: plan.threshold,
            timeout: context.timeout,
            boolean_tensor: context.boolean_tensor,
            experiment_path: plan.experiment_path.clone(),
            log_path: plan.log_path.clone(),
            seed: plan.seed,
            initial_patterns: plan.initial_patterns,
        };
        let outcome = self.algorithms[index].run(&request);

        match outcome {
            Ok(RunOutcome::TimedOut) => {
                record.advance(RunStage::TimedOut);
                let timeout = PipelineError::AlgorithmTimeout {
                    algorithm: descriptor.name.clone(),
                    threshold: plan.threshold,
                };
                warn!(error = %timeout, "deleting files");
                record.notice(timeout.to_string());
                if plan.marks_timeouts {
                    self.timeouts.mark(&descriptor.name, plan.threshold);
                }
                for path in [&plan.experiment_path, &plan.log_path] {
                    if let Err(e) = self.workspace.remove(path) {
                        record.notice(format!("cleanup failed: {e}"));
                    }
                }
            }
            Ok(RunOutcome::Completed {
                experiment_path,
                log_path,
            }) => {
                record.advance(RunStage::Completed);
                match post_process(context.dataset.as_ref(), &descriptor, &experiment_path, &log_path) {
                    Ok(()) => {
                        record.advance(RunStage::PostProcessed);
                    }
                    Err(e) => {
                        warn!(
                            { metrics::ALGORITHM } = descriptor.name.as_str(),
                            error = %e,
                            "post-processing aborted"
                        );
                        record.notice(format!("post-processing aborted: {e}"));
                    }
                }
            }
            Err(e) => {
                warn!({ metrics::ALGORITHM } = descriptor.name.as_str(), error = %e, "algorithm run failed");
                record.notice(format!("run failed: {e}"));
            }
        }
        record
    }
}

/// Dedup, sort unless the algorithm ranks its own output, decode labels and
/// refresh the pattern count of the run log.
///
/// Every step runs in memory; the pattern file and the log are written only
/// once all of them succeeded. Any malformed or undecodable line aborts the
/// whole step and leaves both files as the algorithm wrote them.
pub fn post_process(
    dataset: &dyn Dataset,
    descriptor: &AlgorithmDescriptor,
    experiment_path: &Path,
    log_path: &Path,
) -> Result<(), PipelineError> {
    let rank = dataset.dimension().len();
    let raw = fs::read_to_string(experiment_path).map_err(|e| PipelineError::io(experiment_path, &e))?;
    let parsed = Experiment::parse_str(&raw, rank);
    if let Some(malformed) = parsed.errors.into_iter().next() {
        return Err(malformed);
    }
    let mut experiment = parsed.data;

    let removed = experiment.delete_equal_patterns();
    let cleaned = if !descriptor.provides_own_ordering {
        let sorted = experiment.sort_patterns(dataset)?;
        info!(
            sorted = sorted.sorted,
            { metrics::DEGENERATE_EXCLUDED } = sorted.excluded_degenerate,
            "patterns sorted"
        );
        experiment.to_text()
    } else if removed > 0 {
        experiment.to_text()
    } else {
        raw
    };

    info!(path = %experiment_path.display(), "inverse decoding experiment");
    let decoded = decode_experiment_text(dataset, &cleaned)?;
    let log = if log_path.exists() {
        RunLog::load(log_path)?
    } else {
        None
    };

    fs::write(experiment_path, &decoded).map_err(|e| PipelineError::io(experiment_path, &e))?;
    if let Some(mut log) = log {
        log.patterns = decoded.lines().filter(|line| !line.trim().is_empty()).count();
        log.write(log_path)?;
    }
    Ok(())
}

/// Logs a session-fatal error with its configuration and hands it back.
pub(crate) fn fatal(error: PipelineError, configuration: &str) -> PipelineError {
    error!(
        { metrics::CONFIGURATION } = configuration,
        error = %error,
        "fatal pipeline error, aborting session"
    );
    error
}
