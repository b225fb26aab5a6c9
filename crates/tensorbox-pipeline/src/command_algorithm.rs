//! External miner invoked as a child process.

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tensorbox_core::errors::PipelineError;
use tensorbox_core::tracing::metrics;
use tracing::info;

use crate::algorithm::{Algorithm, AlgorithmDescriptor, RunOutcome, RunRequest};
use crate::process::run_with_timeout;
use crate::run_log::{count_patterns, RunLog};

const DATASET: &str = "{dataset}";
const EXPERIMENT: &str = "{experiment}";
const LOG: &str = "{log}";
const THRESHOLD: &str = "{threshold}";
const SEED: &str = "{seed}";
const INITIAL_PATTERNS: &str = "{initial_patterns}";

/// A miner defined by a program and an argument template.
///
/// Placeholders `{dataset}`, `{experiment}`, `{log}`, `{threshold}`, `{seed}`
/// and `{initial_patterns}` are substituted per run. An argument mentioning
/// `{seed}` or `{initial_patterns}` is dropped when the run has no such value.
/// The miner's stdout and stderr go to the run log, which is then replaced by
/// the three-line summary.
#[derive(Debug, Clone)]
pub struct CommandAlgorithm {
    descriptor: AlgorithmDescriptor,
    program: PathBuf,
    args: Vec<String>,
    boolean_args: Vec<String>,
}

impl CommandAlgorithm {
    pub fn new<I, S>(descriptor: AlgorithmDescriptor, program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            descriptor,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            boolean_args: Vec::new(),
        }
    }

    /// Extra arguments passed only when the tensor is boolean.
    pub fn with_boolean_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Arguments of one run after placeholder substitution.
    pub fn render_args(&self, request: &RunRequest<'_>) -> Vec<String> {
        let boolean = if request.boolean_tensor {
            self.boolean_args.as_slice()
        } else {
            &[]
        };
        boolean
            .iter()
            .chain(&self.args)
            .filter_map(|template| render(template, request))
            .collect()
    }
}

fn render(template: &str, request: &RunRequest<'_>) -> Option<String> {
    let mut arg = template
        .replace(DATASET, &request.dataset.path().display().to_string())
        .replace(EXPERIMENT, &request.experiment_path.display().to_string())
        .replace(LOG, &request.log_path.display().to_string())
        .replace(THRESHOLD, &format!("{:?}", request.threshold));
    if arg.contains(SEED) {
        arg = arg.replace(SEED, &request.seed?.to_string());
    }
    if arg.contains(INITIAL_PATTERNS) {
        arg = arg.replace(INITIAL_PATTERNS, &request.initial_patterns?.to_string());
    }
    Some(arg)
}

impl Algorithm for CommandAlgorithm {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn run(&mut self, request: &RunRequest<'_>) -> Result<RunOutcome, PipelineError> {
        let log_path = &request.log_path;
        let stdout = File::create(log_path).map_err(|e| PipelineError::io(log_path, &e))?;
        let stderr = stdout.try_clone().map_err(|e| PipelineError::io(log_path, &e))?;

        let args = self.render_args(request);
        info!(algorithm = %self.descriptor.name, program = %self.program.display(), ?args, "running");
        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));

        let outcome = run_with_timeout(&mut command, request.timeout)?;
        if outcome.timed_out() {
            return Ok(RunOutcome::TimedOut);
        }
        if !outcome.success() {
            return Err(PipelineError::Process {
                program: self.program.display().to_string(),
                message: format!("exited with {:?}", outcome.status),
            });
        }

        info!(
            { metrics::ALGORITHM } = self.descriptor.name.as_str(),
            { metrics::RUN_TIME_SECS } = outcome.elapsed.as_secs_f64(),
            "miner finished"
        );
        let miner_output = fs::read_to_string(log_path).map_err(|e| PipelineError::io(log_path, &e))?;
        let patterns = count_patterns(&request.experiment_path)?;
        RunLog::from_miner_output(&miner_output, outcome.elapsed.as_secs_f64(), patterns).write(log_path)?;

        Ok(RunOutcome::Completed {
            experiment_path: request.experiment_path.clone(),
            log_path: log_path.clone(),
        })
    }
}
