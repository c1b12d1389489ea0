//! Attribute map between typed resource fields and flat API attributes.
//!
//! An [`AttributeMap`] pairs each local field name with the name the remote
//! API uses for it, and translates in both directions:
//!
//! - **import**: API attributes → store, written as text for the store to coerce
//! - **create export**: every present local field → API attributes
//! - **update export**: only changed local fields → API attributes
//!
//! Only integer, boolean and string values have a remote form. Any other
//! kind aborts the export instead of falling back to a default rendering.

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests;

use crate::store::ConfigStore;
use attrmap_types::{Result, TranslateError, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Flat attribute name → value map as exchanged with the remote API.
pub type ApiAttributes = HashMap<String, String>;

/// Remote side of a single mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawEntry")]
pub struct MappingEntry {
    /// Attribute name used by the remote API (e.g., "DelaySeconds")
    pub api_name: String,
    /// Never sent on update; the remote API only accepts it at creation
    pub skip_update: bool,
}

impl MappingEntry {
    pub fn new(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            skip_update: false,
        }
    }
}

/// Config form of an entry: either a bare API name or the full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Name(String),
    Full {
        api_name: String,
        #[serde(default)]
        skip_update: bool,
    },
}

impl From<RawEntry> for MappingEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Name(api_name) => Self::new(api_name),
            RawEntry::Full { api_name, skip_update } => Self { api_name, skip_update },
        }
    }
}

/// Immutable local field name → remote attribute mapping.
///
/// Entries are walked in local field name order, so the first failure an
/// operation reports is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: BTreeMap<String, MappingEntry>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_simple_map(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }

    /// Marks `local_name` as create-only. Unknown names are ignored.
    #[must_use]
    pub fn with_skip_update(mut self, local_name: &str) -> Self {
        if let Some(entry) = self.entries.get_mut(local_name) {
            entry.skip_update = true;
        }
        self
    }

    /// Writes every mapped attribute found in `api_attributes` into `store`.
    ///
    /// Attributes missing from `api_attributes` leave their field untouched.
    /// Stops at the first rejected write; earlier writes stay in the store.
    pub fn import_to_local<S>(&self, api_attributes: &ApiAttributes, store: &mut S) -> Result<()>
    where
        S: ConfigStore + ?Sized,
    {
        for (local_name, entry) in &self.entries {
            if let Some(value) = api_attributes.get(&entry.api_name) {
                store
                    .set_field(local_name, value)
                    .map_err(|source| TranslateError::FieldWrite {
                        field: local_name.clone(),
                        source,
                    })?;
            }
        }

        Ok(())
    }

    /// API attributes for a create call: every field the store reports as present.
    pub fn export_for_create<S>(&self, store: &S) -> Result<ApiAttributes>
    where
        S: ConfigStore + ?Sized,
    {
        let mut api_attributes = ApiAttributes::new();

        for (local_name, entry) in &self.entries {
            if let Some(value) = store.get_field_if_present(local_name) {
                api_attributes.insert(entry.api_name.clone(), to_api_value(local_name, &value)?);
            }
        }

        Ok(api_attributes)
    }

    /// API attributes for an update call: only fields the store reports as changed.
    ///
    /// A change to the zero value is still sent. Create-only entries are skipped.
    pub fn export_for_update<S>(&self, store: &S) -> Result<ApiAttributes>
    where
        S: ConfigStore + ?Sized,
    {
        let mut api_attributes = ApiAttributes::new();

        for (local_name, entry) in &self.entries {
            if entry.skip_update || !store.has_field_changed(local_name) {
                continue;
            }
            let value = store.get_field(local_name);
            api_attributes.insert(entry.api_name.clone(), to_api_value(local_name, &value)?);
        }

        Ok(api_attributes)
    }

    /// Mapped API attribute names, sorted.
    pub fn api_attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.api_name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn api_name(&self, local_name: &str) -> Option<&str> {
        self.entries.get(local_name).map(|e| e.api_name.as_str())
    }

    /// Reverse lookup of the local field mapped to `api_name`.
    pub fn local_name(&self, api_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e.api_name == api_name)
            .map(|(local, _)| local.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(local, api)| (local.into(), MappingEntry::new(api)))
            .collect();
        Self { entries }
    }
}

/// Remote string form of a local value.
fn to_api_value(local_name: &str, value: &Value) -> Result<String> {
    match value {
        Value::Int(v) => Ok(v.to_string()),
        Value::Bool(v) => Ok(v.to_string()),
        Value::String(v) => Ok(v.clone()),
        Value::Float(_) | Value::Null => Err(TranslateError::UnsupportedValueKind {
            field: local_name.to_string(),
            kind: value.kind(),
        }),
    }
}
