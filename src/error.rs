//! Error types for Evaluar

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Contract violation: {0}")]
    Contract(String),

    #[error("Cannot bind arguments for `{operation}`: missing required {missing:?}")]
    Binding {
        operation: String,
        missing: Vec<String>,
    },

    #[error("Duplicate argument `{key}` while building arguments for `{operation}`")]
    DuplicateArgument { operation: String, key: String },

    #[error("Field error: {0}")]
    Field(String),

    #[error("Sampler error: {0}")]
    Sampler(String),

    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
