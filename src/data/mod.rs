//! Datasets, field values and batch iteration
//!
//! - `value`: loosely typed field values and their stacking/concatenation
//! - `dataset`: instances and input/target field roles
//! - `sampler`: visiting orders (random, sequential, fixed)
//! - `batch`: the batch iterator

mod batch;
mod dataset;
mod sampler;
mod value;

#[cfg(test)]
mod property_tests;

pub use batch::{Batch, BatchIter};
pub use dataset::{DataSet, Instance};
pub use sampler::{FixedSampler, RandomSampler, Sampler, SequentialSampler};
pub use value::{Fields, Value, MAX_EXACT_F32_INT};
