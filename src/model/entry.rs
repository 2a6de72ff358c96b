//! Predict-or-forward dispatch

use super::Model;
use crate::binding::{bind, Signature};
use crate::data::{Fields, Value};
use crate::error::{Error, Result};

/// The operation used for inference, chosen once per evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// The model's dedicated `predict`
    Predict(Signature),
    /// `forward` reused for inference
    Forward(Signature),
}

impl EntryPoint {
    /// Prefer `predict` when the model declares it
    ///
    /// A declared signature that cannot be bound against is a configuration
    /// error, reported here rather than on the first batch.
    pub fn resolve<M: Model + ?Sized>(model: &M) -> Result<Self> {
        match model.predict_signature() {
            Some(sig) => {
                sig.validate().map_err(|e| {
                    Error::Config(format!("predict must be invokable to be used for evaluation: {e}"))
                })?;
                Ok(EntryPoint::Predict(sig))
            }
            None => {
                let sig = model.forward_signature();
                sig.validate()?;
                Ok(EntryPoint::Forward(sig))
            }
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            EntryPoint::Predict(sig) | EntryPoint::Forward(sig) => sig,
        }
    }

    /// Bind `inputs` and call the model, requiring a mapping back
    pub fn invoke<M: Model + ?Sized>(&self, model: &mut M, inputs: &Fields) -> Result<Fields> {
        let args = bind(self.signature(), inputs)?;
        let output = match self {
            EntryPoint::Predict(_) => model.predict(&args)?,
            EntryPoint::Forward(_) => model.forward(&args)?,
        };
        match output {
            Value::Map(fields) => Ok(fields),
            other => Err(Error::Contract(format!(
                "`{}` must return a map of named outputs, got {}",
                self.signature().operation(),
                other.kind()
            ))),
        }
    }
}
