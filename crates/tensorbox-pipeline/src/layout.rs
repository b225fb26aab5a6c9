//! On-disk output layout and the folder operations behind it.
//!
//! ```text
//! <output_root>/<configuration>/output/u<threshold>/experiments/<algorithm>.experiment
//! <output_root>/<configuration>/output/u<threshold>/logs/<algorithm>.log
//! <output_root>/<configuration>/random_study/{ground_patterns,1..N}/{experiments,logs}/
//! <post_analysis_root>/random_study/<algorithm>/
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tensorbox_core::config::TensorboxConfig;
use tensorbox_core::constants::GROUND_TRIAL_NAME;
use tensorbox_core::errors::PipelineError;

const EXPERIMENTS_DIR: &str = "experiments";
const LOGS_DIR: &str = "logs";
const EXPERIMENT_EXTENSION: &str = "experiment";
const LOG_EXTENSION: &str = "log";
const RANDOM_STUDY_DIR: &str = "random_study";

/// Folder creation and deletion.
pub trait Workspace: Send {
    /// Creates `path` and its parents; existing folders are fine.
    fn create_dir(&self, path: &Path) -> Result<(), PipelineError>;

    /// Removes a file or a whole folder; a missing path is fine.
    fn remove(&self, path: &Path) -> Result<(), PipelineError>;
}

/// [`Workspace`] on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWorkspace;

impl Workspace for FsWorkspace {
    fn create_dir(&self, path: &Path) -> Result<(), PipelineError> {
        fs::create_dir_all(path).map_err(|e| PipelineError::io(path, &e))
    }

    fn remove(&self, path: &Path) -> Result<(), PipelineError> {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(PipelineError::io(path, &e)),
            _ => Ok(()),
        }
    }
}

/// A stability-study trial folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trial {
    /// Mined with the full configuration.
    Ground,
    /// Perturbed trial `1..=N`.
    Perturbed(u64),
}

impl Trial {
    pub fn folder_name(&self) -> String {
        match self {
            Self::Ground => GROUND_TRIAL_NAME.to_string(),
            Self::Perturbed(n) => n.to_string(),
        }
    }
}

/// Path arithmetic for every artifact the pipeline writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_root: PathBuf,
    post_analysis_root: PathBuf,
}

impl OutputLayout {
    pub fn new(output_root: impl Into<PathBuf>, post_analysis_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            post_analysis_root: post_analysis_root.into(),
        }
    }

    pub fn from_config(config: &TensorboxConfig) -> Self {
        Self::new(
            config.pipeline.effective_output_root(),
            config.pipeline.effective_post_analysis_root(),
        )
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn configuration_dir(&self, configuration: &str) -> PathBuf {
        self.output_root.join(configuration)
    }

    /// Folder name of a threshold, e.g. `u0.0`.
    pub fn threshold_name(threshold: f64) -> String {
        format!("u{threshold:?}")
    }

    pub fn threshold_dir(&self, configuration: &str, threshold: f64) -> PathBuf {
        self.configuration_dir(configuration)
            .join("output")
            .join(Self::threshold_name(threshold))
    }

    pub fn experiment_path(&self, configuration: &str, threshold: f64, algorithm: &str) -> PathBuf {
        artifact(&self.threshold_dir(configuration, threshold), EXPERIMENTS_DIR, algorithm, EXPERIMENT_EXTENSION)
    }

    pub fn log_path(&self, configuration: &str, threshold: f64, algorithm: &str) -> PathBuf {
        artifact(&self.threshold_dir(configuration, threshold), LOGS_DIR, algorithm, LOG_EXTENSION)
    }

    pub fn random_study_dir(&self, configuration: &str) -> PathBuf {
        self.configuration_dir(configuration).join(RANDOM_STUDY_DIR)
    }

    pub fn trial_dir(&self, configuration: &str, trial: Trial) -> PathBuf {
        self.random_study_dir(configuration).join(trial.folder_name())
    }

    pub fn trial_experiment_path(&self, configuration: &str, trial: Trial, algorithm: &str) -> PathBuf {
        artifact(&self.trial_dir(configuration, trial), EXPERIMENTS_DIR, algorithm, EXPERIMENT_EXTENSION)
    }

    pub fn trial_log_path(&self, configuration: &str, trial: Trial, algorithm: &str) -> PathBuf {
        artifact(&self.trial_dir(configuration, trial), LOGS_DIR, algorithm, LOG_EXTENSION)
    }

    pub fn stability_results_dir(&self, algorithm: &str) -> PathBuf {
        self.post_analysis_root.join(RANDOM_STUDY_DIR).join(algorithm)
    }

    /// Creates the `experiments` and `logs` folders below `dir`.
    pub fn prepare_run_dirs(&self, workspace: &dyn Workspace, dir: &Path) -> Result<(), PipelineError> {
        workspace.create_dir(&dir.join(EXPERIMENTS_DIR))?;
        workspace.create_dir(&dir.join(LOGS_DIR))
    }
}

fn artifact(dir: &Path, kind: &str, algorithm: &str, extension: &str) -> PathBuf {
    dir.join(kind).join(format!("{algorithm}.{extension}"))
}
