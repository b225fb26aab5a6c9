//! Dataset providers: raw-data building and configuration-name lookup.

use std::fmt;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::PipelineError;
use tensorbox_core::types::collections::FxHashMap;
use tracing::info;

use crate::configuration::DatasetConfiguration;
use crate::process::run_with_timeout;

/// Source of the datasets a session runs on.
pub trait DatasetProvider: Send {
    /// Builds every dataset from raw data. The controller calls this at most
    /// once per process.
    fn build(&mut self) -> Result<(), PipelineError>;

    /// Dataset of `configuration`; unknown names are
    /// [`PipelineError::UnsupportedConfiguration`].
    fn dataset(&self, configuration: &DatasetConfiguration) -> Result<Arc<dyn Dataset>, PipelineError>;
}

/// Datasets registered in memory, plus optional preprocessing commands run
/// on build.
#[derive(Default)]
pub struct StaticProvider {
    datasets: FxHashMap<String, Arc<dyn Dataset>>,
    build_commands: Vec<Vec<String>>,
    build_timeout: Option<Duration>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, name: impl Into<String>, dataset: Arc<dyn Dataset>) -> Self {
        self.datasets.insert(name.into(), dataset);
        self
    }

    /// Adds a preprocessing command (`program` followed by its arguments).
    pub fn with_build_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_commands.push(command.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_build_timeout(mut self, timeout: Duration) -> Self {
        self.build_timeout = Some(timeout);
        self
    }
}

impl DatasetProvider for StaticProvider {
    fn build(&mut self) -> Result<(), PipelineError> {
        let timeout = self.build_timeout.unwrap_or(Duration::MAX);
        for argv in &self.build_commands {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            info!(%program, "building datasets from raw data");
            let outcome = run_with_timeout(Command::new(program).args(args), timeout)
                .map_err(|e| PipelineError::DatasetBuild(e.to_string()))?;
            if outcome.timed_out() {
                return Err(PipelineError::DatasetBuild(format!("{program} timed out")));
            }
            if !outcome.success() {
                return Err(PipelineError::DatasetBuild(format!(
                    "{program} exited with {:?}",
                    outcome.status
                )));
            }
        }
        Ok(())
    }

    fn dataset(&self, configuration: &DatasetConfiguration) -> Result<Arc<dyn Dataset>, PipelineError> {
        self.datasets
            .get(&configuration.configuration_name)
            .cloned()
            .ok_or_else(|| PipelineError::UnsupportedConfiguration {
                name: configuration.configuration_name.clone(),
            })
    }
}

impl fmt::Debug for StaticProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.datasets.keys().collect();
        names.sort();
        f.debug_struct("StaticProvider")
            .field("datasets", &names)
            .field("build_commands", &self.build_commands)
            .finish()
    }
}
