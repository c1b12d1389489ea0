//! Configuration store errors.

use crate::ValueKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a configuration store reports when a field write is rejected.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum StoreError {
    /// Field is not declared in the store schema
    #[error("unknown field: {field}")]
    UnknownField {
        /// Name of the undeclared field
        field: String,
    },

    /// Text could not be interpreted as the declared kind
    #[error("invalid value {value:?} for {expected} field {field}")]
    InvalidValue {
        /// Name of the field being written
        field: String,
        /// Kind declared in the schema
        expected: ValueKind,
        /// Rejected input text
        value: String,
    },

    /// Typed write whose kind disagrees with the schema
    #[error("kind mismatch for {field}: expected {expected}, got {actual}")]
    KindMismatch {
        /// Name of the field being written
        field: String,
        /// Kind declared in the schema
        expected: ValueKind,
        /// Kind of the supplied value
        actual: ValueKind,
    },
}
