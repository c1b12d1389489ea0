//! Errors raised while translating between local fields and remote attributes.

use super::StoreError;
use crate::ValueKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the attribute map operations.
///
/// Absent remote attributes and unchanged local fields are not errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum TranslateError {
    /// The store rejected a write during import
    #[error("error setting {field}")]
    FieldWrite {
        /// Local field name that failed
        field: String,
        /// Underlying store failure
        #[source]
        source: StoreError,
    },

    /// A local value has a kind with no remote string form
    #[error("attribute {field} is of unsupported type: {kind}")]
    UnsupportedValueKind {
        /// Local field name holding the value
        field: String,
        /// Observed runtime kind
        kind: ValueKind,
    },
}

impl TranslateError {
    /// Local field name the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::FieldWrite { field, .. } | Self::UnsupportedValueKind { field, .. } => field,
        }
    }
}
