//! Error types for the SQL function layer

use bloom_core::{ConfigurationError, FilterError, FormatError};
use thiserror::Error;

/// Errors surfaced to the host as query-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("Wrong number of arguments to {name}: {actual} (usage: {usage})")]
    WrongArgumentCount {
        name: String,
        usage: &'static str,
        actual: usize,
    },

    #[error("Invalid argument to {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("No such function: {name}/{arity}")]
    UnknownFunction { name: String, arity: usize },

    #[error("Function already registered: {name}/{arity}")]
    AlreadyRegistered { name: String, arity: usize },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl From<ConfigurationError> for FunctionError {
    fn from(err: ConfigurationError) -> Self {
        Self::Filter(err.into())
    }
}

impl From<FormatError> for FunctionError {
    fn from(err: FormatError) -> Self {
        Self::Filter(err.into())
    }
}
