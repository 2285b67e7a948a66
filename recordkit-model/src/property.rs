use recordkit_types::{Result, SharedType, Value};
use std::fmt;
use tracing::debug;

/// A named, typed field of a schema.
///
/// The default is resolved once, here: a declared default the type accepts
/// is stored in cast form, anything else is replaced by the type's own zero
/// value without raising.
#[derive(Clone)]
pub struct Property {
    name: String,
    value_type: SharedType,
    required: bool,
    default_value: Value,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        value_type: SharedType,
        required: bool,
        default: impl Into<Value>,
    ) -> Self {
        let name = name.into();
        let default_value = match value_type.cast(&default.into()) {
            Ok(value) => value,
            Err(e) => {
                debug!(
                    "Declared default of property {} rejected ({}), using {} default",
                    name,
                    e,
                    value_type.name()
                );
                value_type.default_value()
            }
        };
        Self {
            name,
            value_type,
            required,
            default_value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value_type(&self) -> &SharedType {
        &self.value_type
    }

    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// The value read when neither a pending nor a committed value is set.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Casts `value` through this property's type.
    pub fn cast(&self, value: &Value) -> Result<Value> {
        self.value_type.cast(value)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type", &self.value_type.name())
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .finish()
    }
}
