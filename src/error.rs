use thiserror::Error;

use crate::config::ConfigError;

/// Main client error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("XML deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Options validation failed for section '{section}': {}", .failures.join("; "))]
    OptionsValidation {
        section: String,
        failures: Vec<String>,
    },

    #[error("{message} (Parameter '{param}')")]
    InvalidArgument { param: &'static str, message: String },
}

/// Failures while reading an XML document into a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeserializationError {
    #[error("Malformed XML at byte {position}: {details}")]
    Malformed { position: u64, details: String },

    #[error("XML document has no root element")]
    EmptyDocument,

    #[error("Unexpected root element: expected <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("Invalid value for <{tag}>: '{value}' is not a valid {expected}")]
    InvalidValue {
        tag: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid attribute on <{tag}>: {details}")]
    InvalidAttribute { tag: String, details: String },
}

/// Writer failure while producing XML text
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{details}")]
pub struct SerializationError {
    pub details: String,
}

impl SerializationError {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ClientError>;
