//! In-memory dataset backed by a dense tensor.

use std::path::{Path, PathBuf};

use super::{Dataset, LabelCodec};
use crate::errors::DatasetError;
use crate::pattern::Pattern;
use crate::tensor::DenseTensor;

/// A dense tensor plus its baseline statistics and optional label tables.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    path: PathBuf,
    tensor: DenseTensor,
    density: f64,
    empty_model_rss: f64,
    codec: Option<LabelCodec>,
    boolean: bool,
}

impl TensorDataset {
    /// Computes the global density and the empty-model RSS from `tensor`.
    pub fn new(path: impl Into<PathBuf>, tensor: DenseTensor) -> Self {
        let density = tensor.mean();
        let empty_model_rss = tensor.rss_against(density);
        Self {
            path: path.into(),
            tensor,
            density,
            empty_model_rss,
            codec: None,
            boolean: false,
        }
    }

    /// Attaches label tables; their sizes must match the tensor shape.
    pub fn with_codec(mut self, codec: LabelCodec) -> Result<Self, DatasetError> {
        if codec.sizes() != self.tensor.shape() {
            return Err(DatasetError::ShapeMismatch {
                shape: codec.sizes(),
                len: self.tensor.len(),
            });
        }
        self.codec = Some(codec);
        Ok(self)
    }

    pub fn with_boolean(mut self, boolean: bool) -> Self {
        self.boolean = boolean;
        self
    }

    pub fn codec(&self) -> Option<&LabelCodec> {
        self.codec.as_ref()
    }

    fn canonical_line(&self, line: &str) -> Result<String, DatasetError> {
        let pattern = Pattern::parse(line, self.tensor.rank())?;
        Ok(pattern.canonical_string())
    }
}

impl Dataset for TensorDataset {
    fn path(&self) -> &Path {
        &self.path
    }

    fn dimension(&self) -> &[usize] {
        self.tensor.shape()
    }

    fn density(&self) -> f64 {
        self.density
    }

    fn matrix(&self) -> &DenseTensor {
        &self.tensor
    }

    fn empty_model_rss(&self) -> f64 {
        self.empty_model_rss
    }

    fn decode_pattern(&self, line: &str) -> Result<String, DatasetError> {
        match &self.codec {
            Some(codec) => codec.decode_line(line),
            None => self.canonical_line(line),
        }
    }

    fn encode_pattern(&self, line: &str) -> Result<String, DatasetError> {
        match &self.codec {
            Some(codec) => codec.encode_line(line),
            None => self.canonical_line(line),
        }
    }

    fn is_boolean(&self) -> bool {
        self.boolean
    }
}
