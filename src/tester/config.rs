//! Evaluation configuration

use crate::data::{RandomSampler, Sampler, SequentialSampler};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Order in which the dataset is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerKind {
    #[default]
    Random,
    Sequential,
}

/// Evaluation configuration
///
/// # Example
///
/// ```yaml
/// batch_size: 32
/// use_cuda: false
/// verbose: 0
/// sampler: sequential
/// pad_value: 0.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterConfig {
    /// Examples per model invocation
    pub batch_size: usize,

    /// Move the model to the accelerator when one is available
    pub use_cuda: bool,

    /// Print the results when non-negative
    pub verbose: i32,

    /// Dataset visiting order
    pub sampler: SamplerKind,

    /// Seed for the random sampler (None = seeded from the OS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Pad tensor fields to the longest example of each batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_value: Option<f32>,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            batch_size: 16,
            use_cuda: false,
            verbose: 0,
            sampler: SamplerKind::Random,
            seed: None,
            pad_value: None,
        }
    }
}

impl TesterConfig {
    /// Create a new evaluation configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_cuda(mut self, use_cuda: bool) -> Self {
        self.use_cuda = use_cuda;
        self
    }

    pub fn with_verbose(mut self, verbose: i32) -> Self {
        self.verbose = verbose;
        self
    }

    /// Do not print results
    pub fn quiet(self) -> Self {
        self.with_verbose(-1)
    }

    pub fn with_sampler(mut self, sampler: SamplerKind) -> Self {
        self.sampler = sampler;
        self
    }

    /// Random order, reproducible across runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sampler = SamplerKind::Random;
        self.seed = Some(seed);
        self
    }

    pub fn with_padding(mut self, pad_value: f32) -> Self {
        self.pad_value = Some(pad_value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        if let Some(pad) = self.pad_value {
            if !pad.is_finite() {
                return Err(Error::Config(format!("pad_value must be finite, got {pad}")));
            }
        }
        Ok(())
    }

    /// Sampler described by this configuration
    pub fn build_sampler(&self) -> Box<dyn Sampler> {
        match (self.sampler, self.seed) {
            (SamplerKind::Sequential, _) => Box::new(SequentialSampler),
            (SamplerKind::Random, Some(seed)) => Box::new(RandomSampler::with_seed(seed)),
            (SamplerKind::Random, None) => Box::new(RandomSampler::new()),
        }
    }
}

/// Load and validate an evaluation configuration from YAML
///
/// A file that cannot be read is `Error::Io`; malformed YAML or an invalid
/// configuration is `Error::Config`.
///
/// # Example
///
/// ```no_run
/// use evaluar::tester::load_config;
///
/// let config = load_config("eval.yaml")?;
/// println!("batch size: {}", config.batch_size);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TesterConfig> {
    let yaml_content = fs::read_to_string(path.as_ref())?;

    let config: TesterConfig = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;

    config.validate()?;
    Ok(config)
}
