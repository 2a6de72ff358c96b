//! Scoped inference mode

use super::Model;
use crate::autograd::NoGradGuard;
use std::ops::{Deref, DerefMut};

/// Holds a model in eval mode with gradients disabled
///
/// On drop the model goes back to the mode it had when the guard was taken,
/// and gradient tracking to its previous state. This also happens when the
/// evaluation unwinds through `?`.
pub struct InferenceMode<'m, M: Model + ?Sized> {
    model: &'m mut M,
    was_training: bool,
    _no_grad: NoGradGuard,
}

impl<'m, M: Model + ?Sized> InferenceMode<'m, M> {
    pub fn enter(model: &'m mut M) -> Self {
        let was_training = model.is_training();
        model.eval();
        log::debug!("entered inference mode (was_training={was_training})");
        Self {
            model,
            was_training,
            _no_grad: NoGradGuard::new(),
        }
    }

    /// Mode the model will be restored to
    pub fn was_training(&self) -> bool {
        self.was_training
    }
}

impl<M: Model + ?Sized> Deref for InferenceMode<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &*self.model
    }
}

impl<M: Model + ?Sized> DerefMut for InferenceMode<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut *self.model
    }
}

impl<M: Model + ?Sized> Drop for InferenceMode<'_, M> {
    fn drop(&mut self) {
        if self.was_training {
            self.model.train();
        } else {
            self.model.eval();
        }
        log::debug!("left inference mode (training={})", self.was_training);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::{is_grad_enabled, Context};
    use crate::binding::Signature;
    use crate::data::{Fields, Value};
    use crate::error::Result;

    struct ModeModel {
        ctx: Context,
    }

    impl Model for ModeModel {
        fn forward_signature(&self) -> Signature {
            Signature::new("forward")
        }

        fn forward(&mut self, _inputs: &Fields) -> Result<Value> {
            Ok(Value::Map(Fields::new()))
        }

        fn context(&self) -> &Context {
            &self.ctx
        }

        fn context_mut(&mut self) -> &mut Context {
            &mut self.ctx
        }
    }

    #[test]
    fn test_guard_restores_training() {
        let mut model = ModeModel { ctx: Context::new() };
        {
            let guard = InferenceMode::enter(&mut model);
            assert!(!guard.is_training());
            assert!(!is_grad_enabled());
            assert!(guard.was_training());
        }
        assert!(model.is_training());
        assert!(is_grad_enabled());
    }

    #[test]
    fn test_guard_keeps_eval_model_in_eval() {
        let mut model = ModeModel { ctx: Context::new() };
        model.eval();
        drop(InferenceMode::enter(&mut model));
        assert!(!model.is_training());
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn failing(model: &mut ModeModel) -> Result<()> {
            let _guard = InferenceMode::enter(model);
            Err(crate::Error::Model("boom".to_string()))
        }

        let mut model = ModeModel { ctx: Context::new() };
        assert!(failing(&mut model).is_err());
        assert!(model.is_training());
    }
}
