//! # Attrmap Types
//!
//! Value model and error definitions shared by the attribute map crates.
//!
//! - **`value`** - Dynamically typed field values (`Value`, `ValueKind`)
//! - **`error`** - Typed error hierarchy for translation, stores and configuration
//!
//! ## Architecture Role
//!
//! ```text
//!          attrmap-types (this crate)
//!                  │
//!                  ▼
//!            attrmap-core
//!                  │
//!                  ▼
//!             attrmap-cli
//! ```

pub mod error;
pub mod value;

pub use error::{ConfigError, Result, StoreError, TranslateError};
pub use value::{Value, ValueKind};
