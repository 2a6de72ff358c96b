//! Loosely typed field values

use crate::autograd::Tensor;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Largest integer magnitude an f32 holds exactly (2^24)
pub const MAX_EXACT_F32_INT: i64 = 1 << 24;

/// Named values, ordered by field name
pub type Fields = BTreeMap<String, Value>;

/// A field value as carried by datasets, batches and model outputs
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f32),
    Text(String),
    Tensor(Tensor),
    List(Vec<Value>),
    Map(Fields),
}

impl Value {
    /// Short type name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Tensor(_) => "tensor",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Numeric scalar view of `Int` and `Float`
    ///
    /// Integers beyond [`MAX_EXACT_F32_INT`] in magnitude are rounded to the
    /// nearest representable f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Int(v) => Some(*v as f32),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn is_exact_f32(&self) -> bool {
        match self {
            Value::Int(v) => v.unsigned_abs() <= MAX_EXACT_F32_INT as u64,
            Value::Float(_) => true,
            _ => false,
        }
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Value::Tensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Number of per-example entries a sequence value holds
    pub fn seq_len(&self) -> Option<usize> {
        match self {
            Value::Tensor(t) => Some(t.len()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Stack the values of one field across the examples of a batch
    ///
    /// Numeric scalars become a single tensor, as long as every integer fits
    /// an f32 exactly; otherwise the values are kept as a list so ids and
    /// labels are not rounded. Tensors stay one per example,
    /// right-padded to the longest one when `pad_value` is set. Anything else
    /// is kept as a list.
    pub fn stack(values: Vec<Value>, pad_value: Option<f32>) -> Value {
        if !values.is_empty() && values.iter().all(Value::is_exact_f32) {
            let data = values.iter().filter_map(Value::as_f32).collect();
            return Value::Tensor(Tensor::from_vec(data, false));
        }

        if let Some(pad) = pad_value {
            if !values.is_empty() && values.iter().all(|v| matches!(v, Value::Tensor(_))) {
                let longest = values.iter().filter_map(Value::seq_len).max().unwrap_or(0);
                return Value::List(
                    values
                        .iter()
                        .filter_map(Value::as_tensor)
                        .map(|t| Value::Tensor(t.pad_to(longest, pad)))
                        .collect(),
                );
            }
        }

        Value::List(values)
    }

    /// Join per-batch parts of one field into a single sequence, in order
    ///
    /// Tensors concatenate into one tensor and lists extend into one list. A
    /// mix of the two falls back to a list with tensor elements spread out.
    /// Scalars, text and maps are not sequences and are rejected.
    pub fn concat(field: &str, parts: Vec<Value>) -> Result<Value> {
        if parts.iter().all(|p| matches!(p, Value::Tensor(_))) {
            let tensors: Vec<Tensor> = parts
                .into_iter()
                .filter_map(|p| match p {
                    Value::Tensor(t) => Some(t),
                    _ => None,
                })
                .collect();
            return Ok(Value::Tensor(Tensor::concat(&tensors)));
        }

        let mut items = Vec::new();
        for part in parts {
            match part {
                Value::List(values) => items.extend(values),
                Value::Tensor(t) => items.extend(t.data().iter().map(|&v| Value::Float(v))),
                other => {
                    return Err(Error::Contract(format!(
                        "field `{field}` holds a {} per batch, which cannot be concatenated",
                        other.kind()
                    )))
                }
            }
        }
        Ok(Value::List(items))
    }

    /// Flatten a numeric value into one f32 per element
    ///
    /// Returns `None` if any leaf is not numeric. Integers are converted with
    /// [`Value::as_f32`] and lose precision past [`MAX_EXACT_F32_INT`].
    pub fn flatten_numeric(&self) -> Option<Vec<f32>> {
        match self {
            Value::Int(_) | Value::Float(_) => self.as_f32().map(|v| vec![v]),
            Value::Tensor(t) => Some(t.to_vec()),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.extend(item.flatten_numeric()?);
                }
                Some(out)
            }
            Value::Text(_) | Value::Map(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Tensor> for Value {
    fn from(v: Tensor) -> Self {
        Value::Tensor(v)
    }
}

impl From<Vec<f32>> for Value {
    fn from(v: Vec<f32>) -> Self {
        Value::Tensor(Tensor::from(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Fields> for Value {
    fn from(v: Fields) -> Self {
        Value::Map(v)
    }
}
