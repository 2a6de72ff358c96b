//! Model capability and inference-mode handling
//!
//! Evaluar does not run models itself. A [`Model`] implementation wraps
//! whatever runtime computes the forward pass and exposes it through named
//! fields plus a declared [`Signature`].

mod entry;
mod guard;

pub use entry::EntryPoint;
pub use guard::InferenceMode;

use crate::autograd::Context;
use crate::binding::Signature;
use crate::data::{Fields, Value};
use crate::error::Result;
use std::fmt;

/// Where a model's weights live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda(usize),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(idx) => write!(f, "cuda:{idx}"),
        }
    }
}

/// A trained model as seen by the evaluation loop
///
/// `forward` is required. Models with a dedicated inference path declare a
/// `predict_signature` and override `predict`; the evaluator then uses it in
/// place of `forward`. Both must return a [`Value::Map`] of named outputs.
pub trait Model {
    /// Parameters accepted by `forward`
    fn forward_signature(&self) -> Signature;

    /// Compute named outputs from bound inputs
    fn forward(&mut self, inputs: &Fields) -> Result<Value>;

    /// Parameters accepted by `predict`, if the model has one
    fn predict_signature(&self) -> Option<Signature> {
        None
    }

    /// Inference entry point, only called when `predict_signature` is `Some`
    fn predict(&mut self, inputs: &Fields) -> Result<Value> {
        self.forward(inputs)
    }

    /// Mode flag storage
    fn context(&self) -> &Context;

    fn context_mut(&mut self) -> &mut Context;

    /// Switch to training mode
    fn train(&mut self) {
        self.context_mut().train();
    }

    /// Switch to evaluation mode
    fn eval(&mut self) {
        self.context_mut().eval();
    }

    fn is_training(&self) -> bool {
        self.context().is_training()
    }

    /// Whether the backing runtime can place the model on an accelerator
    fn accelerator_available(&self) -> bool {
        false
    }

    /// Move weights to `device`
    fn to_device(&mut self, device: Device) -> Result<()> {
        let _ = device;
        Ok(())
    }
}
