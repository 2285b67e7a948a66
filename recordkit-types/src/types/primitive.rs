//! Types that coerce instead of rejecting: boolean, string and any.

use super::ValueType;
use crate::{Result, Value};

/// Booleans. `"false"` and `"0"` (surrounding whitespace ignored) are false,
/// everything else follows [`Value::is_truthy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl ValueType for BooleanType {
    fn name(&self) -> &str {
        "Boolean"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        if let Value::String(s) = value {
            if matches!(s.trim(), "false" | "0") {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(value.is_truthy()))
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }
}

/// Text. Truthy values become their textual form; falsy values and values
/// whose text is empty (`[]`, `[null]`) become null.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl ValueType for StringType {
    fn name(&self) -> &str {
        "String"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        if !value.is_truthy() {
            return Ok(Value::Null);
        }
        let text = value.to_text();
        Ok(if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        })
    }

    fn default_value(&self) -> Value {
        Value::Null
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnyType;

impl ValueType for AnyType {
    fn name(&self) -> &str {
        "Any"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    fn default_value(&self) -> Value {
        Value::Undefined
    }
}
