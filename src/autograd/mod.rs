//! Minimal tensor and mode primitives
//!
//! Evaluar delegates real computation to the model implementation; this
//! module only provides the values and flags that cross that boundary.

mod context;
mod grad_mode;
mod tensor;


pub use context::Context;
pub use grad_mode::{is_grad_enabled, NoGradGuard};
pub use tensor::Tensor;
