//! Typed error definitions for attribute map translation.
//!
//! Every error is a `thiserror` enum with structured fields so callers can
//! match on the failing field name instead of parsing messages.

mod config;
mod store;
mod translate;

pub use config::ConfigError;
pub use store::StoreError;
pub use translate::TranslateError;

/// Standard Result type using TranslateError.
pub type Result<T> = std::result::Result<T, TranslateError>;
