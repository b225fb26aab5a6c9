//! Dimensionality-conditional representation translators.

use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::PipelineError;
use tensorbox_core::types::collections::FxHashMap;
use tracing::info;

/// Converts a dataset into the serialized form some miners expect.
pub trait Translator: Send {
    fn name(&self) -> &str;

    fn translate(&self, dataset: &dyn Dataset) -> Result<(), PipelineError>;
}

/// Translators keyed by tensor rank.
#[derive(Default)]
pub struct TranslatorRegistry {
    by_rank: FxHashMap<usize, Box<dyn Translator>>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `translator` for tensors of rank `rank`, replacing any
    /// previous one.
    pub fn register(&mut self, rank: usize, translator: Box<dyn Translator>) {
        self.by_rank.insert(rank, translator);
    }

    /// Runs the translator for the dataset's rank. Returns whether one ran;
    /// a missing translator is a no-op.
    pub fn translate(&self, dataset: &dyn Dataset) -> Result<bool, PipelineError> {
        let rank = dataset.dimension().len();
        match self.by_rank.get(&rank) {
            Some(translator) => {
                info!(translator = translator.name(), rank, "translating dataset");
                translator.translate(dataset)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ranks: Vec<_> = self.by_rank.keys().collect();
        ranks.sort();
        f.debug_struct("TranslatorRegistry").field("ranks", &ranks).finish()
    }
}
