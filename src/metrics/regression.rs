//! Regression metrics over named prediction/target fields

use super::trait_def::MetricFn;
use super::{check_same_len, numeric_field};
use crate::binding::Signature;
use crate::data::Fields;
use crate::error::Result;

/// MSE, MAE, RMSE and R² in one pass
///
/// R² = 1 - SS_res / SS_tot; with constant targets it is 1.0 for a perfect
/// fit and 0.0 otherwise.
#[derive(Debug, Clone)]
pub struct RegressionMetric {
    pred: String,
    target: String,
}

impl RegressionMetric {
    pub fn new() -> Self {
        Self {
            pred: "pred".to_string(),
            target: "target".to_string(),
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

impl Default for RegressionMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricFn for RegressionMetric {
    fn name(&self) -> &str {
        "regression"
    }

    fn signature(&self) -> Signature {
        Signature::new("regression")
            .required(self.pred.clone())
            .required(self.target.clone())
    }

    fn evaluate(&self, args: &Fields) -> Result<Vec<(String, f32)>> {
        let predictions = numeric_field(args, &self.pred)?;
        let targets = numeric_field(args, &self.target)?;
        check_same_len(&predictions, &targets)?;

        if predictions.is_empty() {
            return Ok(["mse", "mae", "rmse", "r2"]
                .iter()
                .map(|name| (name.to_string(), 0.0))
                .collect());
        }

        let n = predictions.len() as f32;
        let mut ss_res = 0.0f32;
        let mut abs_sum = 0.0f32;
        for (&p, &t) in predictions.iter().zip(targets.iter()) {
            ss_res += (t - p).powi(2);
            abs_sum += (t - p).abs();
        }

        let y_mean = targets.iter().sum::<f32>() / n;
        let ss_tot: f32 = targets.iter().map(|&t| (t - y_mean).powi(2)).sum();
        let r2 = if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        let mse = ss_res / n;
        Ok(vec![
            ("mse".to_string(), mse),
            ("mae".to_string(), abs_sum / n),
            ("rmse".to_string(), mse.sqrt()),
            ("r2".to_string(), r2),
        ])
    }
}
