//! Configuration store capability.
//!
//! The translator never owns a store. It only reads and writes fields through
//! [`ConfigStore`], leaving schema knowledge and change tracking to the
//! implementation.

mod memory;

pub use memory::ResourceData;

use attrmap_types::{StoreError, Value};

/// Field access a typed, change-tracked configuration store provides.
pub trait ConfigStore {
    /// Writes `value` into `name`, coercing the text to the field's declared kind.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), StoreError>;

    /// Current value of `name`, or `None` when it is unset or zero-valued.
    fn get_field_if_present(&self, name: &str) -> Option<Value>;

    /// Current value of `name` regardless of presence.
    fn get_field(&self, name: &str) -> Value;

    /// Whether `name` differs from its last applied value.
    fn has_field_changed(&self, name: &str) -> bool;
}
