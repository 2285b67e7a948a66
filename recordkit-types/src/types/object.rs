//! Nullable compound types: plain objects and instances of a named kind.

use super::ValueType;
use crate::{Error, Result, Value};

/// Anything of the compound object kind, see [`Value::is_object_kind`].
/// Scalars and `Undefined` are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectType;

impl ValueType for ObjectType {
    fn name(&self) -> &str {
        "Object"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        if value.is_object_kind() {
            Ok(value.clone())
        } else {
            Err(Error::invalid_cast(value, self.name()))
        }
    }

    fn default_value(&self) -> Value {
        Value::Null
    }
}

/// Instances of one kind, or null. Like [`ObjectType`] the type is nullable,
/// so an unassigned field round-trips through storage as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOfType {
    kind: String,
}

impl InstanceOfType {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// The kind accepted values must be instances of.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl ValueType for InstanceOfType {
    fn name(&self) -> &str {
        "InstanceOf"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        if value.is_null() || value.is_instance_of(&self.kind) {
            Ok(value.clone())
        } else {
            Err(Error::invalid_cast(value, self.name()))
        }
    }

    fn default_value(&self) -> Value {
        Value::Null
    }
}
