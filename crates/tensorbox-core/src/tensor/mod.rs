//! Addressable dense tensor with row-major offset arithmetic.

use crate::errors::DatasetError;

/// A `D`-dimensional array of `f64` stored contiguously in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<f64>,
}

impl DenseTensor {
    /// Creates a tensor of the given shape filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        let len = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data: vec![0.0; len],
        }
    }

    /// Wraps row-major `data` with the given shape.
    pub fn from_vec(shape: &[usize], data: Vec<f64>) -> Result<Self, DatasetError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(DatasetError::ShapeMismatch {
                shape: shape.to_vec(),
                len: data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: row_major_strides(shape),
            data,
        })
    }

    /// Builds a tensor from sparse `(index, value)` entries; other cells stay 0.
    pub fn from_entries<I, C>(shape: &[usize], entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (C, f64)>,
        C: AsRef<[usize]>,
    {
        let mut tensor = Self::zeros(shape);
        for (index, value) in entries {
            tensor.set(index.as_ref(), value)?;
        }
        Ok(tensor)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Row-major offset of a cell.
    ///
    /// Fails with `UnsupportedDimension` when `index` has a different
    /// dimensionality than the tensor, and `IndexOutOfBounds` when any
    /// coordinate exceeds its dimension size.
    pub fn offset(&self, index: &[usize]) -> Result<usize, DatasetError> {
        if index.len() != self.shape.len() {
            return Err(DatasetError::UnsupportedDimension {
                requested: index.len(),
                tensor: self.shape.len(),
            });
        }
        let mut offset = 0;
        for ((&i, &size), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= size {
                return Err(DatasetError::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.shape.clone(),
                });
            }
            offset += i * stride;
        }
        Ok(offset)
    }

    pub fn get(&self, index: &[usize]) -> Result<f64, DatasetError> {
        let offset = self.offset(index)?;
        Ok(self.data[offset])
    }

    pub fn set(&mut self, index: &[usize], value: f64) -> Result<(), DatasetError> {
        let offset = self.offset(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Global mean density. Zero for an empty tensor.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Residual sum of squares of the constant model `prediction`.
    pub fn rss_against(&self, prediction: f64) -> f64 {
        self.data.iter().map(|v| (v - prediction).powi(2)).sum()
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}
