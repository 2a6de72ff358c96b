//! Metric capability and the evaluator that dispatches to metrics

use super::report::EvalResult;
use crate::binding::{bind, merge_fields, Signature};
use crate::data::Fields;
use crate::error::Result;

/// A metric computed from accumulated model outputs and targets
///
/// The evaluator binds arguments by name: `evaluate` only ever sees the
/// fields its `signature` declares.
pub trait MetricFn {
    /// Identifies the metric in logs and disambiguates clashing result names
    fn name(&self) -> &str;

    /// Fields the metric consumes
    fn signature(&self) -> Signature;

    /// Named scalar results
    fn evaluate(&self, args: &Fields) -> Result<Vec<(String, f32)>>;
}

/// Metric defined by a closure over its bound arguments
pub struct FnMetric<F> {
    signature: Signature,
    func: F,
}

impl<F> FnMetric<F>
where
    F: Fn(&Fields) -> Result<Vec<(String, f32)>>,
{
    pub fn new(signature: Signature, func: F) -> Self {
        Self { signature, func }
    }
}

impl<F> MetricFn for FnMetric<F>
where
    F: Fn(&Fields) -> Result<Vec<(String, f32)>>,
{
    fn name(&self) -> &str {
        self.signature.operation()
    }

    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn evaluate(&self, args: &Fields) -> Result<Vec<(String, f32)>> {
        (self.func)(args)
    }
}

/// The set of metrics run at the end of an evaluation
///
/// # Example
///
/// ```
/// use evaluar::metrics::{AccuracyMetric, Metrics, RegressionMetric};
///
/// let metrics = Metrics::new()
///     .with(AccuracyMetric::new())
///     .with(RegressionMetric::new().with_pred_field("score"));
/// assert_eq!(metrics.len(), 2);
/// ```
#[derive(Default)]
pub struct Metrics {
    metrics: Vec<Box<dyn MetricFn>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `add`
    pub fn with<M: MetricFn + 'static>(mut self, metric: M) -> Self {
        self.add(metric);
        self
    }

    pub fn add<M: MetricFn + 'static>(&mut self, metric: M) {
        self.metrics.push(Box::new(metric));
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Run every metric over the merged outputs and targets
    ///
    /// Outputs and targets must not share a field name. Results are appended
    /// in registration order; a result name already reported by an earlier
    /// metric is prefixed with the reporting metric's name, then numbered
    /// (`acc`, `accuracy.acc`, `accuracy#2.acc`, ...) until it is free.
    pub fn evaluate(&self, outputs: Fields, targets: Fields) -> Result<EvalResult> {
        let available = merge_fields("metrics", outputs, targets)?;
        let mut result = EvalResult::new();

        for metric in &self.metrics {
            let args = bind(&metric.signature(), &available)?;
            log::debug!("computing metric {} over {:?}", metric.name(), args.keys());
            for (name, value) in metric.evaluate(&args)? {
                let name = unique_name(&result, metric.name(), name);
                result.insert(name, value);
            }
        }

        Ok(result)
    }
}

fn unique_name(result: &EvalResult, metric: &str, name: String) -> String {
    if !result.contains(&name) {
        return name;
    }
    let mut candidate = format!("{metric}.{name}");
    let mut n = 2;
    while result.contains(&candidate) {
        candidate = format!("{metric}#{n}.{name}");
        n += 1;
    }
    candidate
}
