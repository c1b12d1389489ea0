//! Dynamically typed field values held by a configuration store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Signed 64-bit integer
    Int,
    /// `true` / `false`
    Bool,
    /// UTF-8 text
    String,
    /// 64-bit floating point
    Float,
    /// No value at all (unknown field)
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Float => write!(f, "float"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A single field value.
///
/// Serialized untagged, so plain JSON scalars map onto the matching variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    #[default]
    Null,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Float(_) => ValueKind::Float,
            Self::Null => ValueKind::Null,
        }
    }

    /// The zero value a field of `kind` holds before anything is written.
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Int => Self::Int(0),
            ValueKind::Bool => Self::Bool(false),
            ValueKind::String => Self::String(String::new()),
            ValueKind::Float => Self::Float(0.0),
            ValueKind::Null => Self::Null,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::Bool(v) => !*v,
            Self::String(v) => v.is_empty(),
            Self::Float(v) => *v == 0.0,
            Self::Null => true,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}
