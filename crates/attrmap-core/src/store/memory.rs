//! In-memory resource data with a declared schema and change tracking.

use super::ConfigStore;
use attrmap_types::{StoreError, Value, ValueKind};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Typed field values for one resource.
///
/// Keeps two value sets: the *applied* snapshot (what the remote side last
/// accepted) and the *current* values. A field changes when the two differ,
/// with unset fields compared as their kind's zero value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    schema: BTreeMap<String, ValueKind>,
    applied: HashMap<String, Value>,
    current: HashMap<String, Value>,
}

impl ResourceData {
    pub fn new(schema: BTreeMap<String, ValueKind>) -> Self {
        Self {
            schema,
            applied: HashMap::new(),
            current: HashMap::new(),
        }
    }

    /// Store whose applied snapshot and current values both equal `state`.
    pub fn with_state(
        schema: BTreeMap<String, ValueKind>,
        state: HashMap<String, Value>,
    ) -> Result<Self, StoreError> {
        let mut data = Self::new(schema);
        for (name, value) in state {
            data.set_value(&name, value)?;
        }
        data.mark_applied();
        Ok(data)
    }

    /// Declared kind of `name`, if the schema has it.
    pub fn kind(&self, name: &str) -> Option<ValueKind> {
        self.schema.get(name).copied()
    }

    /// Typed write. `Value::Null` clears the field; integers widen into float fields.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StoreError> {
        let value = value.into();
        let expected = self.kind(name).ok_or_else(|| StoreError::UnknownField {
            field: name.to_string(),
        })?;

        let value = match (expected, value) {
            (_, Value::Null) => {
                self.current.remove(name);
                return Ok(());
            }
            (ValueKind::Float, Value::Int(v)) => Value::Float(v as f64),
            (_, Value::Float(v)) if !v.is_finite() => {
                return Err(StoreError::InvalidValue {
                    field: name.to_string(),
                    expected,
                    value: v.to_string(),
                });
            }
            (_, value) => value,
        };
        if value.kind() != expected {
            return Err(StoreError::KindMismatch {
                field: name.to_string(),
                expected,
                actual: value.kind(),
            });
        }

        self.current.insert(name.to_string(), value);
        Ok(())
    }

    /// Accepts the current values as the new applied snapshot.
    pub fn mark_applied(&mut self) {
        debug!("Marking {} field(s) as applied", self.current.len());
        self.applied = self.current.clone();
    }

    /// Current explicitly assigned values, ordered by field name.
    pub fn values(&self) -> BTreeMap<String, Value> {
        self.current.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

fn effective(values: &HashMap<String, Value>, name: &str, kind: ValueKind) -> Value {
    values.get(name).cloned().unwrap_or_else(|| Value::zero(kind))
}

/// Interprets `text` as a value of `kind`.
fn parse_value(field: &str, kind: ValueKind, text: &str) -> Result<Value, StoreError> {
    let invalid = || StoreError::InvalidValue {
        field: field.to_string(),
        expected: kind,
        value: text.to_string(),
    };

    match kind {
        ValueKind::Int => text.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        ValueKind::Bool => match text {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        ValueKind::Float => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Float)
            .ok_or_else(invalid),
        ValueKind::String => Ok(Value::String(text.to_string())),
        ValueKind::Null => Err(invalid()),
    }
}

impl ConfigStore for ResourceData {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        let parsed = self
            .kind(name)
            .ok_or_else(|| StoreError::UnknownField {
                field: name.to_string(),
            })
            .and_then(|kind| parse_value(name, kind, value));

        match parsed {
            Ok(parsed) => {
                debug!(field = name, value, "Setting field");
                self.current.insert(name.to_string(), parsed);
                Ok(())
            }
            Err(e) => {
                warn!(field = name, "Rejected field write: {}", e);
                Err(e)
            }
        }
    }

    /// Booleans count as present once assigned, even when `false`.
    fn get_field_if_present(&self, name: &str) -> Option<Value> {
        self.current
            .get(name)
            .filter(|v| v.kind() == ValueKind::Bool || !v.is_zero())
            .cloned()
    }

    fn get_field(&self, name: &str) -> Value {
        match self.kind(name) {
            Some(kind) => effective(&self.current, name, kind),
            None => Value::Null,
        }
    }

    fn has_field_changed(&self, name: &str) -> bool {
        match self.kind(name) {
            Some(kind) => {
                effective(&self.current, name, kind) != effective(&self.applied, name, kind)
            }
            None => false,
        }
    }
}
