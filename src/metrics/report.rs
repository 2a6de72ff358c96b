//! Evaluation results and their textual form

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Metric name to value, in the order the metrics reported them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalResult {
    entries: Vec<(String, f32)>,
}

impl EvalResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing an existing entry of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: f32) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f32)> for EvalResult {
    fn from_iter<I: IntoIterator<Item = (String, f32)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (name, value) in iter {
            result.insert(name, value);
        }
        result
    }
}

impl Serialize for EvalResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Render `name=value` pairs joined by `", "`
///
/// # Example
///
/// ```
/// use evaluar::metrics::{format_results, EvalResult};
///
/// let mut result = EvalResult::new();
/// result.insert("acc", 0.75);
/// result.insert("f1", 0.5);
/// assert_eq!(format_results(&result), "acc=0.75, f1=0.5");
/// ```
pub fn format_results(results: &EvalResult) -> String {
    results
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for EvalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_results(self))
    }
}
