//! Declared parameter lists

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// One declared parameter of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Required parameters have no default and must be bound
    pub required: bool,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// The named parameters an operation accepts
///
/// # Example
///
/// ```
/// use evaluar::binding::Signature;
///
/// let sig = Signature::new("forward").required("words").optional("seq_len");
/// assert_eq!(sig.param_names().collect::<Vec<_>>(), vec!["words", "seq_len"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    operation: String,
    params: Vec<Param>,
}

impl Signature {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    /// Add a required parameter
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param::required(name));
        self
    }

    /// Add a parameter that has a default on the callee side
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param::optional(name));
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// Check the signature can be bound against at all
    pub fn validate(&self) -> Result<()> {
        if self.operation.trim().is_empty() {
            return Err(Error::Config("signature has no operation name".to_string()));
        }
        let mut seen = BTreeSet::new();
        for param in &self.params {
            if param.name.is_empty() {
                return Err(Error::Config(format!(
                    "`{}` declares a parameter with an empty name",
                    self.operation
                )));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(Error::Config(format!(
                    "`{}` declares parameter `{}` twice",
                    self.operation, param.name
                )));
            }
        }
        Ok(())
    }
}
