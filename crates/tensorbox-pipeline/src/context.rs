//! Explicit per-configuration state threaded through the pipeline.

use std::sync::Arc;
use std::time::Duration;

use tensorbox_core::config::TensorboxConfig;
use tensorbox_core::dataset::Dataset;

use crate::configuration::DatasetConfiguration;

/// The configuration currently executing and the dataset it runs on.
#[derive(Clone)]
pub struct SessionContext {
    pub configuration: DatasetConfiguration,
    pub dataset: Arc<dyn Dataset>,
    pub timeout: Duration,
    pub boolean_tensor: bool,
}

impl SessionContext {
    pub fn new(
        configuration: DatasetConfiguration,
        dataset: Arc<dyn Dataset>,
        config: &TensorboxConfig,
    ) -> Self {
        let timeout_secs = configuration
            .timeout_secs
            .unwrap_or_else(|| config.pipeline.effective_timeout_secs());
        let boolean_tensor = configuration.boolean_tensor || dataset.is_boolean();
        Self {
            configuration,
            dataset,
            timeout: Duration::from_secs(timeout_secs),
            boolean_tensor,
        }
    }

    pub fn name(&self) -> &str {
        &self.configuration.configuration_name
    }

    /// Tensor rank.
    pub fn rank(&self) -> usize {
        self.dataset.dimension().len()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("configuration", &self.configuration.configuration_name)
            .field("dataset", &self.dataset.path())
            .field("timeout", &self.timeout)
            .field("boolean_tensor", &self.boolean_tensor)
            .finish()
    }
}
