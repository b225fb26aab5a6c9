//! Dataset collaborator interface.
//!
//! Ingestion (label-encoding raw columns, building the dense tensor from an
//! event log) happens outside this crate; the pipeline and the evaluators only
//! see a [`Dataset`].

pub mod label_codec;
pub mod tensor_dataset;

use std::collections::BTreeSet;
use std::path::Path;

use crate::errors::DatasetError;
use crate::pattern::Cells;
use crate::tensor::DenseTensor;

pub use label_codec::LabelCodec;
pub use tensor_dataset::TensorDataset;

/// Read-only view of one dataset configuration.
pub trait Dataset: Send + Sync {
    /// Path of the processed (integer-encoded) tensor file handed to miners.
    fn path(&self) -> &Path;

    /// Size of every dimension.
    fn dimension(&self) -> &[usize];

    /// Global mean density, the empty-model prediction (lambda 0).
    fn density(&self) -> f64;

    fn matrix(&self) -> &DenseTensor;

    /// RSS of the empty model over the whole tensor.
    fn empty_model_rss(&self) -> f64;

    /// Rewrites an integer-index pattern line with categorical labels.
    fn decode_pattern(&self, line: &str) -> Result<String, DatasetError>;

    /// Rewrites a labelled pattern line with integer indices.
    fn encode_pattern(&self, line: &str) -> Result<String, DatasetError>;

    /// Whether miners should treat the tensor as boolean.
    fn is_boolean(&self) -> bool {
        false
    }

    /// Mean tensor value over the Cartesian product of `tuples`.
    /// Returns 0.0 for an empty product.
    fn tuples_density(&self, tuples: &[BTreeSet<usize>]) -> Result<f64, DatasetError> {
        let matrix = self.matrix();
        if tuples.len() != matrix.rank() {
            return Err(DatasetError::UnsupportedDimension {
                requested: tuples.len(),
                tensor: matrix.rank(),
            });
        }
        let mut sum = 0.0;
        let mut area = 0usize;
        for cell in Cells::new(tuples) {
            sum += matrix.get(&cell)?;
            area += 1;
        }
        if area == 0 {
            return Ok(0.0);
        }
        Ok(sum / area as f64)
    }
}
