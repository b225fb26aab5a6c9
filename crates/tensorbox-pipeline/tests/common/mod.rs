//! Shared fixtures: a 2x2 labelled dataset and scripted algorithms.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tensorbox_core::config::TensorboxConfig;
use tensorbox_core::dataset::{Dataset, LabelCodec, TensorDataset};
use tensorbox_core::errors::PipelineError;
use tensorbox_core::tensor::DenseTensor;
use tensorbox_pipeline::{Algorithm, AlgorithmDescriptor, RunOutcome, RunRequest};

pub const LOG: &str = "Total time: 0.5s\nMemory (kb): 10\nNb of patterns: 3";

/// Values `[[1.0, 0.0], [0.5, 1.0]]`, labels `a,b` by `x,y`.
pub fn toy_dataset(root: &Path) -> Arc<dyn Dataset> {
    let tensor = DenseTensor::from_vec(&[2, 2], vec![1.0, 0.0, 0.5, 1.0]).unwrap();
    let codec = LabelCodec::from_labels(vec![
        vec!["a".to_string(), "b".to_string()],
        vec!["x".to_string(), "y".to_string()],
    ]);
    Arc::new(
        TensorDataset::new(root.join("toy.tensor"), tensor)
            .with_codec(codec)
            .unwrap(),
    )
}

pub fn config(root: &Path) -> TensorboxConfig {
    let mut config = TensorboxConfig::default();
    config.pipeline.output_root = Some(root.join("iteration"));
    config.pipeline.post_analysis_root = Some(root.join("post_analysis"));
    config.pipeline.configs_dir = Some(root.join("configs"));
    config.pipeline.timeout_secs = Some(5);
    config
}

/// What a scripted run does.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Writes the pattern file and a run log.
    Write(&'static str),
    /// Writes a partial pattern file, then reports a timeout.
    TimeOut,
    Fail,
}

/// Parameters a scripted algorithm was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub threshold: f64,
    pub seed: Option<u64>,
    pub initial_patterns: Option<usize>,
    pub experiment_path: PathBuf,
}

type Script = Box<dyn Fn(&RunRequest<'_>) -> Step + Send>;

pub struct Scripted {
    descriptor: AlgorithmDescriptor,
    script: Script,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl Scripted {
    pub fn new(descriptor: AlgorithmDescriptor, script: impl Fn(&RunRequest<'_>) -> Step + Send + 'static) -> Self {
        Self {
            descriptor,
            script: Box::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(name: &str, step: Step) -> Self {
        Self::new(AlgorithmDescriptor::new(name), move |_| step)
    }
}

impl Algorithm for Scripted {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn run(&mut self, request: &RunRequest<'_>) -> Result<RunOutcome, PipelineError> {
        self.calls.lock().unwrap().push(Call {
            threshold: request.threshold,
            seed: request.seed,
            initial_patterns: request.initial_patterns,
            experiment_path: request.experiment_path.clone(),
        });
        match (self.script)(request) {
            Step::Write(patterns) => {
                fs::write(&request.experiment_path, patterns).unwrap();
                fs::write(&request.log_path, LOG).unwrap();
                Ok(RunOutcome::Completed {
                    experiment_path: request.experiment_path.clone(),
                    log_path: request.log_path.clone(),
                })
            }
            Step::TimeOut => {
                fs::write(&request.experiment_path, "0 0 1.0\n").unwrap();
                fs::write(&request.log_path, "partial").unwrap();
                Ok(RunOutcome::TimedOut)
            }
            Step::Fail => Err(PipelineError::Process {
                program: self.descriptor.name.clone(),
                message: "exited with 1".to_string(),
            }),
        }
    }
}
