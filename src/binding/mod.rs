//! Name-based argument binding
//!
//! Operations declare the parameter names they accept as a [`Signature`];
//! binding picks the matching entries out of a bag of named values.

mod signature;

#[cfg(test)]
mod tests;

pub use signature::{Param, Signature};

use crate::data::Fields;
use crate::error::{Error, Result};

/// Select the values `signature` declares, by exact name
///
/// Keys the signature does not declare are dropped. Every required parameter
/// without a matching key is reported in a single [`Error::Binding`].
pub fn bind(signature: &Signature, available: &Fields) -> Result<Fields> {
    let missing: Vec<String> = signature
        .params()
        .iter()
        .filter(|p| p.required && !available.contains_key(&p.name))
        .map(|p| p.name.clone())
        .collect();

    if !missing.is_empty() {
        return Err(Error::Binding {
            operation: signature.operation().to_string(),
            missing,
        });
    }

    Ok(signature
        .param_names()
        .filter_map(|name| {
            available
                .get(name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect())
}

/// Union of outputs and targets for metric dispatch
///
/// A name present on both sides is ambiguous and rejected.
pub fn merge_fields(operation: &str, outputs: Fields, targets: Fields) -> Result<Fields> {
    let mut merged = outputs;
    for (key, value) in targets {
        if merged.contains_key(&key) {
            return Err(Error::DuplicateArgument {
                operation: operation.to_string(),
                key,
            });
        }
        merged.insert(key, value);
    }
    Ok(merged)
}
