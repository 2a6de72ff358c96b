//! Batched evaluation of a trained model
//!
//! [`Tester`] runs a model over a dataset in inference mode, gathers the
//! named outputs alongside the dataset targets and hands both to the
//! configured metrics.
//!
//! # Example
//!
//! ```no_run
//! use evaluar::data::DataSet;
//! use evaluar::metrics::{AccuracyMetric, Metrics};
//! use evaluar::tester::{Tester, TesterConfig};
//! # use evaluar::model::Model;
//! # fn run<M: Model>(model: M, data: DataSet) -> evaluar::Result<()> {
//!
//! let metrics = Metrics::new().with(AccuracyMetric::new());
//! let mut tester = Tester::new(data, model, metrics, TesterConfig::default())?;
//!
//! let results = tester.test()?;
//! println!("accuracy: {:?}", results.get("acc"));
//! # Ok(())
//! # }
//! ```

mod config;


pub use config::{load_config, SamplerKind, TesterConfig};

use crate::data::{BatchIter, DataSet, Fields, Sampler, Value};
use crate::error::Result;
use crate::metrics::{format_results, EvalResult, Metrics};
use crate::model::{Device, EntryPoint, InferenceMode, Model};
use std::collections::BTreeMap;
use std::time::Instant;

/// Evaluation driver
pub struct Tester<M: Model> {
    /// Dataset to evaluate over
    data: DataSet,

    /// Model under evaluation
    model: M,

    /// Metrics run over the accumulated outputs
    metrics: Metrics,

    /// Evaluation configuration
    config: TesterConfig,

    /// Inference operation, resolved at construction
    entry: EntryPoint,

    /// Visiting order for batches
    sampler: Box<dyn Sampler>,
}

impl<M: Model> Tester<M> {
    /// Create a new tester
    ///
    /// Validates `config`, places the model on the accelerator if asked to and
    /// one is available, and picks `predict` over `forward` when the model
    /// declares it.
    pub fn new(data: DataSet, mut model: M, metrics: Metrics, config: TesterConfig) -> Result<Self> {
        config.validate()?;

        if config.use_cuda && model.accelerator_available() {
            let device = Device::Cuda(0);
            model.to_device(device)?;
            log::info!("moved model to {device}");
        } else if config.use_cuda {
            log::warn!("use_cuda is set but no accelerator is available; evaluating on cpu");
        }

        let entry = EntryPoint::resolve(&model)?;
        log::debug!(
            "evaluating through `{}` ({:?})",
            entry.signature().operation(),
            entry.signature().param_names().collect::<Vec<_>>()
        );

        let sampler = config.build_sampler();
        Ok(Self {
            data,
            model,
            metrics,
            config,
            entry,
            sampler,
        })
    }

    /// Replace the sampler built from the configuration
    pub fn with_sampler<S: Sampler + 'static>(mut self, sampler: S) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    /// Run one full evaluation pass
    ///
    /// The model is held in eval mode with gradients disabled for the whole
    /// pass, and returned to its previous mode afterwards whether or not the
    /// pass succeeds. Any error aborts the pass; there are no partial results.
    pub fn test(&mut self) -> Result<EvalResult> {
        let start = Instant::now();

        let results = {
            let mut network = InferenceMode::enter(&mut self.model);
            let batches = BatchIter::new(&self.data, self.config.batch_size, self.sampler.as_mut())?
                .with_padding(self.config.pad_value);
            let num_batches = batches.num_batches();

            let mut outputs: BTreeMap<String, Vec<Value>> = BTreeMap::new();
            let mut truths: BTreeMap<String, Vec<Value>> = BTreeMap::new();

            for batch in batches {
                let prediction = self.entry.invoke(&mut *network, &batch.inputs)?;
                for (name, value) in prediction {
                    outputs.entry(name).or_default().push(value);
                }
                for (name, value) in batch.targets {
                    truths.entry(name).or_default().push(value);
                }
            }
            log::debug!("ran {num_batches} batches over {} instances", self.data.len());

            let outputs = concat_fields(outputs)?;
            let truths = concat_fields(truths)?;
            self.metrics.evaluate(outputs, truths)?
        };

        log::info!(
            "evaluated {} instances in {:.3}s",
            self.data.len(),
            start.elapsed().as_secs_f64()
        );

        if self.config.verbose >= 0 {
            println!("[tester] {}", format_results(&results));
        }

        Ok(results)
    }

    /// The inference operation in use
    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Give the model back
    pub fn into_model(self) -> M {
        self.model
    }
}

fn concat_fields(parts: BTreeMap<String, Vec<Value>>) -> Result<Fields> {
    parts
        .into_iter()
        .map(|(name, values)| {
            let joined = Value::concat(&name, values)?;
            Ok((name, joined))
        })
        .collect()
}
