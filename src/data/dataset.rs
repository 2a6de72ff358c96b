//! In-memory dataset with input/target field roles

use super::value::{Fields, Value};
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// One example: field name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    fields: Fields,
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl From<Fields> for Instance {
    fn from(fields: Fields) -> Self {
        Self { fields }
    }
}

/// Ordered collection of instances
///
/// Fields flagged as input are fed to the model, fields flagged as target are
/// handed to the metrics. A field may carry both roles. Every instance must
/// hold every flagged field.
///
/// # Example
///
/// ```
/// use evaluar::data::{DataSet, Instance};
///
/// let mut data = DataSet::new();
/// data.push(Instance::new().with_field("x", 1.0f32).with_field("y", 0i64)).unwrap();
/// data.set_input(&["x"]).unwrap();
/// data.set_target(&["y"]).unwrap();
///
/// assert_eq!(data.len(), 1);
/// assert!(data.is_input("x"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    instances: Vec<Instance>,
    inputs: BTreeSet<String>,
    targets: BTreeSet<String>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from instances without any field roles
    pub fn from_instances(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            ..Self::default()
        }
    }

    /// Append an instance; it must carry every field that has a role
    pub fn push(&mut self, instance: Instance) -> Result<()> {
        if let Some(missing) = self
            .inputs
            .iter()
            .chain(self.targets.iter())
            .find(|name| instance.get(name).is_none())
        {
            return Err(Error::Field(format!(
                "instance {} is missing flagged field `{missing}`",
                self.instances.len()
            )));
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Flag fields as model inputs
    pub fn set_input(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            self.check_field(name)?;
            self.inputs.insert((*name).to_string());
        }
        Ok(())
    }

    /// Flag fields as evaluation targets
    pub fn set_target(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            self.check_field(name)?;
            self.targets.insert((*name).to_string());
        }
        Ok(())
    }

    /// Drop the input role from a field
    pub fn unset_input(&mut self, name: &str) {
        self.inputs.remove(name);
    }

    /// Drop the target role from a field
    pub fn unset_target(&mut self, name: &str) {
        self.targets.remove(name);
    }

    fn check_field(&self, name: &str) -> Result<()> {
        match self.instances.iter().position(|inst| inst.get(name).is_none()) {
            Some(idx) => Err(Error::Field(format!(
                "field `{name}` is missing from instance {idx}"
            ))),
            None => Ok(()),
        }
    }

    pub fn is_input(&self, name: &str) -> bool {
        self.inputs.contains(name)
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.targets.contains(name)
    }

    pub fn input_fields(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(String::as_str)
    }

    pub fn target_fields(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    pub fn get(&self, idx: usize) -> Option<&Instance> {
        self.instances.get(idx)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        DataSet::from_instances(vec![
            Instance::new().with_field("x", 1.0f32).with_field("y", 1i64),
            Instance::new().with_field("x", 2.0f32),
        ])
    }

    #[test]
    fn test_set_input_on_complete_field() {
        let mut data = sample();
        data.set_input(&["x"]).unwrap();
        assert!(data.is_input("x"));
        assert!(!data.is_target("x"));
    }

    #[test]
    fn test_flagging_incomplete_field_fails() {
        let mut data = sample();
        let err = data.set_target(&["y"]).unwrap_err();
        assert!(matches!(err, Error::Field(msg) if msg.contains("instance 1")));
        assert!(!data.is_target("y"));
    }

    #[test]
    fn test_push_checks_flagged_fields() {
        let mut data = sample();
        data.set_input(&["x"]).unwrap();
        assert!(data.push(Instance::new().with_field("y", 0i64)).is_err());
        assert!(data.push(Instance::new().with_field("x", 3.0f32)).is_ok());
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_unset_roles() {
        let mut data = sample();
        data.set_input(&["x"]).unwrap();
        data.unset_input("x");
        assert_eq!(data.input_fields().count(), 0);
    }
}
