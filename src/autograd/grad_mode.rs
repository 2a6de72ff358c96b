//! Thread-local switch for gradient tracking

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether gradient tracking is enabled on this thread
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

fn set_grad_enabled(enabled: bool) {
    GRAD_ENABLED.with(|flag| flag.set(enabled));
}

/// Disables gradient tracking until dropped
///
/// Guards nest: dropping one restores whatever state was active when it was
/// created, not unconditionally `true`.
///
/// # Example
///
/// ```
/// use evaluar::autograd::{is_grad_enabled, NoGradGuard};
///
/// {
///     let _guard = NoGradGuard::new();
///     assert!(!is_grad_enabled());
/// }
/// assert!(is_grad_enabled());
/// ```
#[must_use = "gradient tracking is re-enabled as soon as the guard is dropped"]
pub struct NoGradGuard {
    prev: bool,
    // Thread-local state, so the guard must stay on its thread
    _not_send: PhantomData<*const ()>,
}

impl NoGradGuard {
    pub fn new() -> Self {
        let prev = is_grad_enabled();
        set_grad_enabled(false);
        Self {
            prev,
            _not_send: PhantomData,
        }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        set_grad_enabled(self.prev);
    }
}
