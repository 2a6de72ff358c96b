//! Per-model execution mode

/// Train/eval flag owned by a model
///
/// Models consult it to switch training-only behaviour such as dropout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    training: bool,
}

impl Context {
    /// Create a new context, in training mode
    pub fn new() -> Self {
        Self { training: true }
    }

    /// Set training mode
    pub fn train(&mut self) {
        self.training = true;
    }

    /// Set evaluation mode
    pub fn eval(&mut self) {
        self.training = false;
    }

    /// Set the mode explicitly
    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    /// Check if in training mode
    pub fn is_training(&self) -> bool {
        self.training
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
