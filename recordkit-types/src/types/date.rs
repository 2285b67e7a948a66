//! Timestamp type.
//!
//! Permissive: input it cannot interpret casts to null instead of failing.

use super::ValueType;
use crate::{Result, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl DateType {
    /// Casts to an optional timestamp; the lifecycle stores its audit
    /// timestamps in this form.
    #[must_use]
    pub fn cast_timestamp(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Date(date) => Some(*date),
            Value::Int(millis) => DateTime::from_timestamp_millis(*millis),
            Value::Float(millis) if millis.is_finite() => {
                DateTime::from_timestamp_millis(millis.trunc() as i64)
            }
            Value::String(s) => parse_timestamp(s),
            _ => None,
        }
    }
}

impl ValueType for DateType {
    fn name(&self) -> &str {
        "Date"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        Ok(Self::cast_timestamp(value).into())
    }

    fn default_value(&self) -> Value {
        Value::Date(Utc::now())
    }
}

/// Parses RFC 3339 first, then naive `YYYY-MM-DD[ HH:MM:SS]` forms read as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
