//! Tensor type with gradient tracking flag

use super::grad_mode::is_grad_enabled;
use ndarray::Array1;

/// One-dimensional f32 tensor
///
/// Evaluar never differentiates, it only carries the `requires_grad` flag so
/// that values produced while gradients are disabled come out detached.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Array1<f32>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a new tensor with data
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data,
            requires_grad,
        }
    }

    /// Create a tensor from a vector
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a tensor filled with zeros
    pub fn zeros(size: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(size), requires_grad)
    }

    /// Create a tensor filled with `value`
    pub fn full(size: usize, value: f32, requires_grad: bool) -> Self {
        Self::new(Array1::from_elem(size, value), requires_grad)
    }

    /// Get reference to data
    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    /// Get mutable reference to data
    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    /// Copy the elements out into a vector
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.to_vec()
    }

    /// Check if requires gradient
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Same data, no gradient tracking
    pub fn detach(&self) -> Self {
        Self::new(self.data.clone(), false)
    }

    /// Get size
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the largest element, first one on ties
    pub fn argmax(&self) -> Option<usize> {
        self.data
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Concatenate tensors end to end
    ///
    /// The result tracks gradients only if some part does and gradient
    /// tracking is currently enabled.
    pub fn concat(parts: &[Tensor]) -> Self {
        let data: Array1<f32> = parts.iter().flat_map(|t| t.data.iter().copied()).collect();
        let requires_grad = is_grad_enabled() && parts.iter().any(Tensor::requires_grad);
        Self::new(data, requires_grad)
    }

    /// Right-pad with `value` up to `len`; longer tensors are returned unchanged
    pub fn pad_to(&self, len: usize, value: f32) -> Self {
        if self.len() >= len {
            return self.clone();
        }
        let mut data = self.data.to_vec();
        data.resize(len, value);
        Self::from_vec(data, self.requires_grad && is_grad_enabled())
    }
}

impl From<Vec<f32>> for Tensor {
    fn from(data: Vec<f32>) -> Self {
        Self::from_vec(data, false)
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data)
            .field("requires_grad", &self.requires_grad)
            .finish()
    }
}
