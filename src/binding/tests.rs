//! Tests for argument binding

use super::*;
use crate::data::Value;
use proptest::prelude::*;

fn fields(pairs: &[(&str, f32)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::Float(*v)))
        .collect()
}

#[test]
fn test_bind_selects_declared_only() {
    let sig = Signature::new("forward").required("x").optional("mask");
    let bound = bind(&sig, &fields(&[("x", 1.0), ("y", 2.0)])).unwrap();
    assert_eq!(bound.keys().collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn test_bind_includes_present_optional() {
    let sig = Signature::new("forward").required("x").optional("mask");
    let bound = bind(&sig, &fields(&[("x", 1.0), ("mask", 0.0)])).unwrap();
    assert_eq!(bound.len(), 2);
}

#[test]
fn test_bind_reports_all_missing() {
    let sig = Signature::new("accuracy").required("pred").required("target");
    let err = bind(&sig, &fields(&[("other", 1.0)])).unwrap_err();
    match err {
        Error::Binding { operation, missing } => {
            assert_eq!(operation, "accuracy");
            assert_eq!(missing, vec!["pred".to_string(), "target".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bind_empty_signature() {
    let sig = Signature::new("noop");
    assert!(bind(&sig, &fields(&[("x", 1.0)])).unwrap().is_empty());
}

#[test]
fn test_validate_rejects_duplicates() {
    let sig = Signature::new("predict").required("x").optional("x");
    assert!(matches!(sig.validate(), Err(Error::Config(_))));
    assert!(Signature::new("").validate().is_err());
    assert!(Signature::new("predict").required("x").validate().is_ok());
}

#[test]
fn test_merge_fields_union() {
    let merged = merge_fields(
        "metrics",
        fields(&[("pred", 1.0)]),
        fields(&[("target", 0.0)]),
    )
    .unwrap();
    assert_eq!(merged.len(), 2);
}

#[test]
fn test_merge_fields_rejects_collision() {
    let err = merge_fields("metrics", fields(&[("y", 1.0)]), fields(&[("y", 0.0)])).unwrap_err();
    assert!(matches!(err, Error::DuplicateArgument { key, .. } if key == "y"));
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,4}").unwrap()
}

proptest! {
    #[test]
    fn prop_bind_is_idempotent_and_order_independent(
        declared in prop::collection::btree_set(arb_name(), 0..6),
        available in prop::collection::btree_map(arb_name(), -5.0f32..5.0, 0..10),
    ) {
        let available: Fields = available.into_iter().map(|(k, v)| (k, Value::Float(v))).collect();

        let forward = declared
            .iter()
            .fold(Signature::new("op"), |sig, name| sig.optional(name.clone()));
        let reversed = declared
            .iter()
            .rev()
            .fold(Signature::new("op"), |sig, name| sig.optional(name.clone()));

        let once = bind(&forward, &available).unwrap();
        let twice = bind(&forward, &once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once, &bind(&reversed, &available).unwrap());

        for key in once.keys() {
            prop_assert!(declared.contains(key));
        }
    }
}
