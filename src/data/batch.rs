//! Mini-batch iteration over a dataset

use super::dataset::DataSet;
use super::sampler::{check_permutation, Sampler};
use super::value::{Fields, Value};
use crate::error::{Error, Result};

/// A batch of examples split into model inputs and evaluation targets
///
/// Both mappings hold the stacked per-example values in the same example
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Input fields
    pub inputs: Fields,
    /// Target fields
    pub targets: Fields,
    size: usize,
}

impl Batch {
    /// Create a new batch of `size` examples
    pub fn new(inputs: Fields, targets: Fields, size: usize) -> Self {
        Self {
            inputs,
            targets,
            size,
        }
    }

    /// Number of examples in the batch
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Lazy single pass over a dataset in sampler order
///
/// The sampler's order must be a permutation of the dataset indices, so every
/// instance lands in exactly one batch.
///
/// Yields `ceil(len / batch_size)` batches; all are full except possibly the
/// last one. The order is drawn once at construction, so the iterator cannot
/// be restarted.
pub struct BatchIter<'a> {
    data: &'a DataSet,
    order: Vec<usize>,
    batch_size: usize,
    pos: usize,
    pad_value: Option<f32>,
}

impl<'a> BatchIter<'a> {
    pub fn new(data: &'a DataSet, batch_size: usize, sampler: &mut dyn Sampler) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        let order = sampler.sample(data.len())?;
        check_permutation(&order, data.len())?;
        Ok(Self {
            data,
            order,
            batch_size,
            pos: 0,
            pad_value: None,
        })
    }

    /// Pad tensor fields to the longest example in each batch
    pub fn with_padding(mut self, pad_value: Option<f32>) -> Self {
        self.pad_value = pad_value;
        self
    }

    /// Total number of batches in one pass
    pub fn num_batches(&self) -> usize {
        self.order.len().div_ceil(self.batch_size)
    }

    fn collect_fields<'f>(
        &self,
        indices: &[usize],
        names: impl Iterator<Item = &'f str>,
    ) -> Fields {
        names
            .map(|name| {
                let values = indices
                    .iter()
                    .filter_map(|&idx| self.data.get(idx))
                    .filter_map(|inst| inst.get(name).cloned())
                    .collect();
                (name.to_string(), Value::stack(values, self.pad_value))
            })
            .collect()
    }
}

impl Iterator for BatchIter<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.pos >= self.order.len() {
            return None;
        }
        let end = (self.pos + self.batch_size).min(self.order.len());
        let indices = &self.order[self.pos..end];

        let inputs = self.collect_fields(indices, self.data.input_fields());
        let targets = self.collect_fields(indices, self.data.target_fields());
        let batch = Batch::new(inputs, targets, indices.len());

        self.pos = end;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.pos).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter<'_> {}
