//! Value types: the cast/validate/default contracts fields are declared with.
//!
//! Every field write goes through [`ValueType::cast`], which either returns a
//! value in the type's canonical domain or fails with
//! [`Error::InvalidCast`](crate::Error::InvalidCast). Validity is never
//! decided separately: [`ValueType::is_valid`] is "cast does not fail".
//!
//! Built-in variants are created through the [`Type`] shorthands, or from a
//! configuration document via [`TypeDef`].

mod date;
mod enumeration;
mod numeric;
mod object;
mod primitive;

pub use date::DateType;
pub use enumeration::EnumType;
pub use numeric::{FloatType, IntegerType};
pub use object::{InstanceOfType, ObjectType};
pub use primitive::{AnyType, BooleanType, StringType};

use crate::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The capability every value type provides.
///
/// Implement this to add a custom type; `is_valid` is provided and should
/// stay derived from `cast`.
pub trait ValueType: fmt::Debug + Send + Sync {
    /// Name of the type, e.g. `Integer`.
    fn name(&self) -> &str;

    /// Converts `value` into the type's canonical representation, or fails
    /// with `InvalidCast`.
    fn cast(&self, value: &Value) -> Result<Value>;

    /// Zero value of the type. Always passes `is_valid`.
    fn default_value(&self) -> Value;

    /// Whether `cast(value)` succeeds.
    fn is_valid(&self, value: &Value) -> bool {
        self.cast(value).is_ok()
    }
}

/// A value type shared between properties and schemas.
pub type SharedType = Arc<dyn ValueType>;

/// Shorthands for the built-in value types.
pub struct Type;

impl Type {
    /// Whole numbers; strings are read up to their first non-numeric character.
    #[must_use]
    pub fn integer() -> SharedType {
        Arc::new(IntegerType)
    }

    /// Numbers keeping their fractional part.
    #[must_use]
    pub fn float() -> SharedType {
        Arc::new(FloatType)
    }

    /// Text; empty and falsy inputs become null.
    #[must_use]
    pub fn string() -> SharedType {
        Arc::new(StringType)
    }

    /// Booleans; never rejects a value.
    #[must_use]
    pub fn boolean() -> SharedType {
        Arc::new(BooleanType)
    }

    /// Compound values: null, arrays, objects, dates and instances.
    #[must_use]
    pub fn object() -> SharedType {
        Arc::new(ObjectType)
    }

    /// Instances of the named kind.
    #[must_use]
    pub fn instance_of(kind: impl Into<String>) -> SharedType {
        Arc::new(InstanceOfType::new(kind))
    }

    /// Timestamps; defaults to the current time.
    #[must_use]
    pub fn date() -> SharedType {
        Arc::new(DateType)
    }

    /// One of a fixed set of strings. Fails if `default` is not among `values`.
    pub fn enumeration<I, S>(default: &str, values: I) -> Result<SharedType>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Arc::new(EnumType::new(default, values)?))
    }

    /// Accepts anything unchanged.
    #[must_use]
    pub fn any() -> SharedType {
        Arc::new(AnyType)
    }
}

/// Configuration form of a value type, as found in schema documents.
///
/// `name` is the snake_case variant name (`integer`, `instance_of`, ...).
/// `kind` is only read for `instance_of`, `values` only for `enum`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(rename = "type")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "options")]
    pub values: Option<Vec<String>>,
}

impl TypeDef {
    /// Shorthand for a definition without parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds the value type this definition describes.
    ///
    /// `declared_default` is the property's raw default; an enum uses it as
    /// its own default when it is a string, and its first value otherwise.
    pub fn resolve(&self, declared_default: &Value) -> Result<SharedType> {
        match self.name.as_str() {
            "integer" => Ok(Type::integer()),
            "float" => Ok(Type::float()),
            "string" => Ok(Type::string()),
            "boolean" => Ok(Type::boolean()),
            "object" => Ok(Type::object()),
            "date" => Ok(Type::date()),
            "any" => Ok(Type::any()),
            "instance_of" => {
                let kind = self.kind.as_deref().ok_or_else(|| {
                    Error::UnsupportedOperation("instance_of type requires a kind".to_string())
                })?;
                Ok(Type::instance_of(kind))
            }
            "enum" => {
                let values = self.values.as_deref().unwrap_or_default();
                let default = match declared_default.as_str() {
                    Some(default) => default,
                    None => values.first().map(String::as_str).ok_or_else(|| {
                        Error::UnsupportedOperation("enum type requires values".to_string())
                    })?,
                };
                Type::enumeration(default, values.iter().cloned())
            }
            other => Err(Error::UnsupportedOperation(format!(
                "unknown value type `{other}`"
            ))),
        }
    }
}
