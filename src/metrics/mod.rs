//! Evaluation metrics
//!
//! Metrics declare the fields they consume and receive exactly those,
//! bound by name from the merged model outputs and dataset targets.
//!
//! - Classification: accuracy, precision/recall/F1
//! - Regression: MSE, MAE, RMSE, R²

mod classification;
mod regression;
mod report;
mod trait_def;

#[cfg(test)]
mod tests;

pub use classification::{AccuracyMetric, PrecisionRecallF1};
pub use regression::RegressionMetric;
pub use report::{format_results, EvalResult};
pub use trait_def::{FnMetric, MetricFn, Metrics};

use crate::data::{Fields, Value};
use crate::error::{Error, Result};

fn field<'a>(args: &'a Fields, name: &str) -> Result<&'a Value> {
    args.get(name).ok_or_else(|| Error::Binding {
        operation: "metric".to_string(),
        missing: vec![name.to_string()],
    })
}

fn numeric_field(args: &Fields, name: &str) -> Result<Vec<f32>> {
    let value = field(args, name)?;
    value
        .flatten_numeric()
        .ok_or_else(|| Error::Contract(format!("field `{name}` is not numeric ({})", value.kind())))
}

fn check_same_len(predictions: &[f32], targets: &[f32]) -> Result<()> {
    if predictions.len() != targets.len() {
        return Err(Error::ShapeMismatch {
            expected: vec![targets.len()],
            got: vec![predictions.len()],
        });
    }
    Ok(())
}
