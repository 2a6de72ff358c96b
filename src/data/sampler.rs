//! Sampling orders for batch iteration

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces the order in which dataset indices are visited
pub trait Sampler {
    /// A permutation of `0..len`
    fn sample(&mut self, len: usize) -> Result<Vec<usize>>;
}

/// Uniformly random permutation
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible order for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self, len: usize) -> Result<Vec<usize>> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        Ok(order)
    }
}

/// Dataset order
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler;

impl Sampler for SequentialSampler {
    fn sample(&mut self, len: usize) -> Result<Vec<usize>> {
        Ok((0..len).collect())
    }
}

/// Replays a caller-supplied order
///
/// The order is checked against the dataset when batching starts.
#[derive(Debug, Clone)]
pub struct FixedSampler {
    order: Vec<usize>,
}

impl FixedSampler {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }
}

impl Sampler for FixedSampler {
    fn sample(&mut self, _len: usize) -> Result<Vec<usize>> {
        Ok(self.order.clone())
    }
}

/// Check that `order` visits every index of `0..len` exactly once
pub(crate) fn check_permutation(order: &[usize], len: usize) -> Result<()> {
    if order.len() != len {
        return Err(Error::Sampler(format!(
            "sampler returned {} indices for {len} instances",
            order.len()
        )));
    }
    let mut seen = vec![false; len];
    for &idx in order {
        if idx >= len || seen[idx] {
            return Err(Error::Sampler(format!(
                "sampler order is not a permutation of 0..{len} (index {idx})"
            )));
        }
        seen[idx] = true;
    }
    Ok(())
}
