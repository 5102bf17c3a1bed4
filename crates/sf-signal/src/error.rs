//! Error types for dispatch backends

use thiserror::Error;

use crate::SignalFunction;

/// A backend accepted a call and failed while handling it.
///
/// Declining a call is not an error; see [`crate::Outcome::NotImplemented`].
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{function}() {message}")]
    Signature {
        function: &'static str,
        message: String,
    },

    #[error("{function}(): '{param}' expected {expected}, got {found}")]
    Type {
        function: &'static str,
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{function}(): invalid value for '{param}': {message}")]
    InvalidArgument {
        function: &'static str,
        param: &'static str,
        message: String,
    },

    #[error("Unknown signal function: {0}")]
    UnknownFunction(String),

    #[error("{function} is already handled by backend '{existing}'")]
    Overlap {
        function: SignalFunction,
        existing: String,
    },

    #[error("Backend domain {found:?} does not match {expected:?}")]
    Domain { expected: String, found: String },

    #[error("Device library error: {0}")]
    Library(#[from] LibraryError),
}

/// Failure reported by an accelerated library operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LibraryError {
    pub message: String,
}

impl LibraryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A value the accelerated library cannot turn into one of its arrays
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot convert {found} to a device array")]
pub struct ConversionError {
    pub found: String,
}

impl ConversionError {
    pub fn new(found: impl Into<String>) -> Self {
        Self {
            found: found.into(),
        }
    }
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
