//! Resource definitions loaded from JSON.
//!
//! A definition names the resource, declares its local field kinds and maps
//! those fields onto remote attribute names:
//!
//! ```json
//! {
//!   "resource": "queue",
//!   "schema": { "name": "string", "delay": "int", "fifo": "bool" },
//!   "attributes": {
//!     "name": "QueueName",
//!     "delay": "DelaySeconds",
//!     "fifo": { "api_name": "FifoQueue", "skip_update": true }
//!   }
//! }
//! ```

use crate::store::ResourceData;
use crate::translator::AttributeMap;
use attrmap_types::{ConfigError, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Schema plus attribute map for one resource type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceConfig {
    pub resource: String,
    pub schema: BTreeMap<String, ValueKind>,
    pub attributes: AttributeMap,
}

impl ResourceConfig {
    /// Checks the attribute map against the schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "resource".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if let Some((name, _)) = self.schema.iter().find(|(_, kind)| **kind == ValueKind::Null) {
            return Err(ConfigError::ValidationError {
                field: name.clone(),
                message: "null is not a field kind".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (local_name, entry) in self.attributes.iter() {
            if !self.schema.contains_key(local_name) {
                return Err(ConfigError::ValidationError {
                    field: local_name.to_string(),
                    message: "mapped field is not declared in schema".to_string(),
                });
            }
            if !seen.insert(entry.api_name.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: local_name.to_string(),
                    message: format!("API attribute {} is mapped more than once", entry.api_name),
                });
            }
        }

        Ok(())
    }

    /// Empty store for this resource's schema.
    pub fn new_store(&self) -> ResourceData {
        ResourceData::new(self.schema.clone())
    }
}

/// Reads, parses and validates a resource definition.
pub fn load_config(path: &Path) -> Result<ResourceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.display().to_string(),
        },
        _ => ConfigError::from_io_error(&e),
    })?;
    let config: ResourceConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    debug!("Parsed resource config from {}", path.display());

    config.validate()?;
    info!(
        resource = %config.resource,
        attributes = config.attributes.len(),
        "Loaded resource config"
    );

    Ok(config)
}
