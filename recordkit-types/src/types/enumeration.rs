use super::ValueType;
use crate::{Error, Result, Value};

/// One of a fixed set of strings, with its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    default: String,
    values: Vec<String>,
}

impl EnumType {
    /// Creates an enum over `values`. `default` must be one of them.
    pub fn new<I, S>(default: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.iter().any(|v| v == default) {
            return Err(Error::UnsupportedOperation(format!(
                "enum default `{default}` is not one of the defined values"
            )));
        }
        Ok(Self {
            default: default.to_string(),
            values,
        })
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl ValueType for EnumType {
    fn name(&self) -> &str {
        "Enum"
    }

    /// Accepts truthy values whose trimmed text is a member, returning that
    /// member.
    fn cast(&self, value: &Value) -> Result<Value> {
        if value.is_truthy() {
            let text = value.to_text();
            let trimmed = text.trim();
            if let Some(member) = self.values.iter().find(|v| *v == trimmed) {
                return Ok(Value::String(member.clone()));
            }
        }
        Err(Error::invalid_cast(value, self.name()))
    }

    fn default_value(&self) -> Value {
        Value::String(self.default.clone())
    }
}
