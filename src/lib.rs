//! # Evaluar: Batched Model Evaluation
//!
//! Evaluar runs a trained model over a dataset in mini-batches, collects its
//! named outputs next to the dataset targets and scores them with metrics
//! bound by field name.
//!
//! ## Architecture
//!
//! - **autograd**: Tensor values, train/eval context, gradient-mode guard
//! - **data**: Datasets with input/target field roles, samplers, batch iteration
//! - **binding**: Declared parameter lists and name-based argument binding
//! - **model**: Model capability, predict-or-forward dispatch, inference-mode guard
//! - **metrics**: Metric capability, built-in metrics, result formatting
//! - **tester**: The evaluation driver and its configuration

pub mod autograd;
pub mod binding;
pub mod data;
pub mod metrics;
pub mod model;
pub mod tester;

pub mod error;

// Re-export commonly used types
pub use autograd::{Context, Tensor};
pub use data::{DataSet, Fields, Instance, Value};
pub use error::{Error, Result};
pub use metrics::{EvalResult, Metrics};
pub use model::Model;
pub use tester::{Tester, TesterConfig};
