//! Tests for metrics and the metric evaluator

use super::*;
use crate::binding::Signature;
use crate::data::{Fields, Value};
use crate::error::Error;
use approx::assert_abs_diff_eq;

fn args(pred: Value, target: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert("pred".to_string(), pred);
    fields.insert("target".to_string(), target);
    fields
}

fn score(scores: &[(String, f32)], name: &str) -> f32 {
    scores
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| *v)
        .unwrap_or(f32::NAN)
}

#[test]
fn test_accuracy_threshold_half() {
    let metric = AccuracyMetric::new().with_threshold(0.5);
    let scores = metric
        .evaluate(&args(
            Value::from(vec![0.9, 0.9, 0.1, 0.1]),
            Value::from(vec![1.0, 0.0, 1.0, 0.0]),
        ))
        .unwrap();
    assert_abs_diff_eq!(score(&scores, "acc"), 0.5, epsilon = 1e-6);
}

#[test]
fn test_accuracy_argmax_rows() {
    let pred = Value::List(vec![
        Value::from(vec![0.1, 0.9]),
        Value::from(vec![0.8, 0.2]),
        Value::from(vec![0.3, 0.7]),
    ]);
    let scores = AccuracyMetric::new()
        .evaluate(&args(pred, Value::from(vec![1.0, 0.0, 0.0])))
        .unwrap();
    assert_abs_diff_eq!(score(&scores, "acc"), 2.0 / 3.0, epsilon = 1e-6);
}

#[test]
fn test_accuracy_empty_is_zero() {
    let scores = AccuracyMetric::new()
        .evaluate(&args(Value::from(Vec::<f32>::new()), Value::from(Vec::<f32>::new())))
        .unwrap();
    assert_eq!(score(&scores, "acc"), 0.0);
}

#[test]
fn test_accuracy_length_mismatch() {
    let err = AccuracyMetric::new()
        .evaluate(&args(Value::from(vec![1.0]), Value::from(vec![1.0, 0.0])))
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_accuracy_rejects_text() {
    let err = AccuracyMetric::new()
        .evaluate(&args(Value::from("cat"), Value::from(vec![1.0])))
        .unwrap_err();
    assert!(matches!(err, Error::Contract(_)));
}

#[test]
fn test_accuracy_field_remapping() {
    let metric = AccuracyMetric::new()
        .with_pred_field("label_pred")
        .with_target_field("label");
    let names: Vec<String> = metric.signature().param_names().map(String::from).collect();
    assert_eq!(names, vec!["label_pred", "label", "seq_len"]);
}

#[test]
fn test_precision_recall_f1() {
    // 2 predicted positives, 2 actual positives, 1 true positive
    let scores = PrecisionRecallF1::default()
        .evaluate(&args(
            Value::from(vec![0.9, 0.8, 0.2, 0.1]),
            Value::from(vec![1.0, 0.0, 1.0, 0.0]),
        ))
        .unwrap();
    assert_abs_diff_eq!(score(&scores, "precision"), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(score(&scores, "recall"), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(score(&scores, "f1"), 0.5, epsilon = 1e-6);
}

#[test]
fn test_precision_without_positive_predictions() {
    let scores = PrecisionRecallF1::default()
        .evaluate(&args(Value::from(vec![0.1, 0.2]), Value::from(vec![1.0, 0.0])))
        .unwrap();
    assert_eq!(score(&scores, "precision"), 0.0);
    assert_eq!(score(&scores, "f1"), 0.0);
}

#[test]
fn test_regression_metrics() {
    let scores = RegressionMetric::new()
        .evaluate(&args(
            Value::from(vec![1.0, 2.0, 3.0]),
            Value::from(vec![1.5, 2.5, 3.5]),
        ))
        .unwrap();
    assert_abs_diff_eq!(score(&scores, "mae"), 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(score(&scores, "mse"), 0.25, epsilon = 1e-5);
    assert_abs_diff_eq!(score(&scores, "rmse"), 0.5, epsilon = 1e-5);
}

#[test]
fn test_r2_mean_prediction() {
    let scores = RegressionMetric::new()
        .evaluate(&args(
            Value::from(vec![2.0, 2.0, 2.0]),
            Value::from(vec![1.0, 2.0, 3.0]),
        ))
        .unwrap();
    assert_abs_diff_eq!(score(&scores, "r2"), 0.0, epsilon = 1e-5);
}

#[test]
fn test_r2_constant_targets() {
    let perfect = RegressionMetric::new()
        .evaluate(&args(Value::from(vec![2.0, 2.0]), Value::from(vec![2.0, 2.0])))
        .unwrap();
    assert_eq!(score(&perfect, "r2"), 1.0);
}

#[test]
fn test_metrics_evaluate_in_registration_order() {
    let metrics = Metrics::new()
        .with(AccuracyMetric::new())
        .with(PrecisionRecallF1::default());

    let mut outputs = Fields::new();
    outputs.insert("pred".to_string(), Value::from(vec![1.0, 0.0]));
    let mut targets = Fields::new();
    targets.insert("target".to_string(), Value::from(vec![1.0, 1.0]));

    let result = metrics.evaluate(outputs, targets).unwrap();
    let names: Vec<&str> = result.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["acc", "precision", "recall", "f1"]);
    assert_abs_diff_eq!(result.get("acc").unwrap(), 0.5, epsilon = 1e-6);
}

#[test]
fn test_metrics_missing_field_is_binding_error() {
    let metrics = Metrics::new().with(AccuracyMetric::new().with_target_field("label"));

    let mut outputs = Fields::new();
    outputs.insert("pred".to_string(), Value::from(vec![1.0]));
    let mut targets = Fields::new();
    targets.insert("target".to_string(), Value::from(vec![1.0]));

    let err = metrics.evaluate(outputs, targets).unwrap_err();
    assert!(matches!(err, Error::Binding { missing, .. } if missing == vec!["label".to_string()]));
}

#[test]
fn test_metrics_duplicate_result_names_prefixed() {
    let metrics = Metrics::new()
        .with(AccuracyMetric::new())
        .with(FnMetric::new(Signature::new("other"), |_args: &Fields| {
            Ok(vec![("acc".to_string(), 1.0)])
        }));

    let mut outputs = Fields::new();
    outputs.insert("pred".to_string(), Value::from(vec![0.0]));
    let mut targets = Fields::new();
    targets.insert("target".to_string(), Value::from(vec![0.0]));

    let result = metrics.evaluate(outputs, targets).unwrap();
    assert_eq!(result.get("acc"), Some(1.0));
    assert_eq!(result.get("other.acc"), Some(1.0));
}

#[test]
fn test_metrics_same_metric_three_times_keeps_every_result() {
    let metrics = Metrics::new()
        .with(AccuracyMetric::new())
        .with(AccuracyMetric::new().with_pred_field("p2"))
        .with(AccuracyMetric::new().with_pred_field("p3"));

    let mut outputs = Fields::new();
    outputs.insert("pred".to_string(), Value::from(vec![1.0, 0.0]));
    outputs.insert("p2".to_string(), Value::from(vec![0.0, 0.0]));
    outputs.insert("p3".to_string(), Value::from(vec![1.0, 1.0]));
    let mut targets = Fields::new();
    targets.insert("target".to_string(), Value::from(vec![1.0, 1.0]));

    let result = metrics.evaluate(outputs, targets).unwrap();
    let names: Vec<&str> = result.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["acc", "accuracy.acc", "accuracy#2.acc"]);
    assert_eq!(result.get("acc"), Some(0.5));
    assert_eq!(result.get("accuracy.acc"), Some(0.0));
    assert_eq!(result.get("accuracy#2.acc"), Some(1.0));
}

#[test]
fn test_fn_metric_sees_only_declared_fields() {
    let metric = FnMetric::new(Signature::new("count").required("pred"), |args: &Fields| {
        Ok(vec![("fields".to_string(), args.len() as f32)])
    });
    let result = Metrics::new()
        .with(metric)
        .evaluate(
            args(Value::from(vec![1.0]), Value::from(vec![1.0])),
            Fields::new(),
        )
        .unwrap();
    assert_eq!(result.get("fields"), Some(1.0));
}

#[test]
fn test_format_results_order() {
    let result: EvalResult = vec![("f1".to_string(), 1.0), ("acc".to_string(), 0.5)]
        .into_iter()
        .collect();
    assert_eq!(format_results(&result), "f1=1, acc=0.5");
    assert_eq!(result.to_string(), "f1=1, acc=0.5");
    assert_eq!(format_results(&EvalResult::new()), "");
}

#[test]
fn test_eval_result_serializes_as_ordered_map() {
    let result: EvalResult = vec![("recall".to_string(), 0.25), ("acc".to_string(), 0.5)]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(json, r#"{"recall":0.25,"acc":0.5}"#);
}
