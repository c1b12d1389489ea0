//! # Attrmap Core
//!
//! Translates a named set of attributes between a typed, change-tracked
//! resource configuration store and the flat string map an external API
//! exchanges.
//!
//! ```text
//! attrmap-core/src/
//! ├── translator/   # AttributeMap: import, create export, update export
//! ├── store/        # ConfigStore capability trait + in-memory ResourceData
//! └── config.rs     # JSON resource definitions (schema + attribute map)
//! ```

pub mod config;
pub mod store;
pub mod translator;

pub use attrmap_types::{ConfigError, Result, StoreError, TranslateError, Value, ValueKind};
pub use config::{load_config, ResourceConfig};
pub use store::{ConfigStore, ResourceData};
pub use translator::{ApiAttributes, AttributeMap, MappingEntry};
