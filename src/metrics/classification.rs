//! Classification metrics over named prediction/target fields

use super::trait_def::MetricFn;
use super::{check_same_len, field, numeric_field};
use crate::binding::Signature;
use crate::data::{Fields, Value};
use crate::error::{Error, Result};

/// Fraction of examples whose predicted label equals the target label
///
/// Predictions are either one number per example or one score tensor per
/// example. Numbers are turned into labels by `threshold` (binary) when set,
/// otherwise by rounding; score tensors by argmax.
///
/// # Example
///
/// ```
/// use evaluar::data::{Fields, Value};
/// use evaluar::metrics::{AccuracyMetric, MetricFn};
///
/// let mut args = Fields::new();
/// args.insert("pred".into(), Value::from(vec![1.0, 0.0, 2.0]));
/// args.insert("target".into(), Value::from(vec![1.0, 1.0, 2.0]));
///
/// let scores = AccuracyMetric::new().evaluate(&args).unwrap();
/// assert_eq!(scores[0].0, "acc");
/// assert!((scores[0].1 - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct AccuracyMetric {
    pred: String,
    target: String,
    threshold: Option<f32>,
}

impl AccuracyMetric {
    pub fn new() -> Self {
        Self {
            pred: "pred".to_string(),
            target: "target".to_string(),
            threshold: None,
        }
    }

    /// Read predictions from `name` instead of `pred`
    pub fn with_pred_field(mut self, name: impl Into<String>) -> Self {
        self.pred = name.into();
        self
    }

    /// Read targets from `name` instead of `target`
    pub fn with_target_field(mut self, name: impl Into<String>) -> Self {
        self.target = name.into();
        self
    }

    /// Binary decision threshold for scalar predictions
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    fn labels(&self, pred: &Value) -> Result<Vec<f32>> {
        if let Value::List(rows) = pred {
            if !rows.is_empty() && rows.iter().all(|r| matches!(r, Value::Tensor(_))) {
                return Ok(rows
                    .iter()
                    .filter_map(Value::as_tensor)
                    .map(|scores| scores.argmax().map_or(-1.0, |i| i as f32))
                    .collect());
            }
        }

        let values = pred.flatten_numeric().ok_or_else(|| {
            Error::Contract(format!("field `{}` is not numeric ({})", self.pred, pred.kind()))
        })?;
        Ok(values
            .into_iter()
            .map(|p| match self.threshold {
                Some(threshold) if p >= threshold => 1.0,
                Some(_) => 0.0,
                None => p.round(),
            })
            .collect())
    }
}

impl Default for AccuracyMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricFn for AccuracyMetric {
    fn name(&self) -> &str {
        "accuracy"
    }

    fn signature(&self) -> Signature {
        Signature::new("accuracy")
            .required(self.pred.clone())
            .required(self.target.clone())
            .optional("seq_len")
    }

    fn evaluate(&self, args: &Fields) -> Result<Vec<(String, f32)>> {
        let labels = self.labels(field(args, &self.pred)?)?;
        let targets = numeric_field(args, &self.target)?;
        check_same_len(&labels, &targets)?;

        if labels.is_empty() {
            return Ok(vec![("acc".to_string(), 0.0)]);
        }

        let correct = labels
            .iter()
            .zip(targets.iter())
            .filter(|(&p, &t)| (p - t).abs() < 0.5)
            .count();

        Ok(vec![(
            "acc".to_string(),
            correct as f32 / labels.len() as f32,
        )])
    }
}

/// Binary precision, recall and F1
///
/// A prediction is positive when it is at least `threshold`, a target when it
/// is at least 0.5.
#[derive(Debug, Clone)]
pub struct PrecisionRecallF1 {
    pred: String,
    target: String,
    threshold: f32,
}

impl PrecisionRecallF1 {
    pub fn new(threshold: f32) -> Self {
        Self {
            pred: "pred".to_string(),
            target: "target".to_string(),
            threshold,
        }
    }

    pub fn with_pred_field(mut self, name: impl Into<String>) -> Self {
        self.pred = name.into();
        self
    }

    pub fn with_target_field(mut self, name: impl Into<String>) -> Self {
        self.target = name.into();
        self
    }
}

impl Default for PrecisionRecallF1 {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MetricFn for PrecisionRecallF1 {
    fn name(&self) -> &str {
        "prf"
    }

    fn signature(&self) -> Signature {
        Signature::new("prf")
            .required(self.pred.clone())
            .required(self.target.clone())
            .optional("seq_len")
    }

    fn evaluate(&self, args: &Fields) -> Result<Vec<(String, f32)>> {
        let predictions = numeric_field(args, &self.pred)?;
        let targets = numeric_field(args, &self.target)?;
        check_same_len(&predictions, &targets)?;

        let mut true_positives = 0usize;
        let mut predicted_positives = 0usize;
        let mut actual_positives = 0usize;

        for (&p, &t) in predictions.iter().zip(targets.iter()) {
            let pred_positive = p >= self.threshold;
            let actual_positive = t >= 0.5;

            if pred_positive {
                predicted_positives += 1;
            }
            if actual_positive {
                actual_positives += 1;
            }
            if pred_positive && actual_positive {
                true_positives += 1;
            }
        }

        let precision = if predicted_positives == 0 {
            0.0
        } else {
            true_positives as f32 / predicted_positives as f32
        };
        let recall = if actual_positives == 0 {
            0.0
        } else {
            true_positives as f32 / actual_positives as f32
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * (precision * recall) / (precision + recall)
        };

        Ok(vec![
            ("precision".to_string(), precision),
            ("recall".to_string(), recall),
            ("f1".to_string(), f1),
        ])
    }
}
