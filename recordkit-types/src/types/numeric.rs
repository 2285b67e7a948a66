//! Integer and float types.
//!
//! Both accept numbers and strings with a leading numeric prefix (`"5abc"`
//! reads as 5). Everything else is rejected, arrays included, so numeric
//! fields only ever hold scalars.

use super::ValueType;
use crate::{Error, Result, Value};

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl ValueType for IntegerType {
    fn name(&self) -> &str {
        "Integer"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        let parsed = match value {
            Value::Int(n) => Some(*n),
            Value::Float(f) => truncate(*f),
            Value::String(s) => parse_int_prefix(s),
            _ => None,
        };
        parsed
            .map(Value::Int)
            .ok_or_else(|| Error::invalid_cast(value, self.name()))
    }

    fn default_value(&self) -> Value {
        Value::Int(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatType;

impl ValueType for FloatType {
    fn name(&self) -> &str {
        "Float"
    }

    fn cast(&self, value: &Value) -> Result<Value> {
        let parsed = match value {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::String(s) => parse_float_prefix(s),
            _ => None,
        };
        parsed
            .map(Value::Float)
            .ok_or_else(|| Error::invalid_cast(value, self.name()))
    }

    fn default_value(&self) -> Value {
        Value::Float(0.0)
    }
}

/// Truncates toward zero, rejecting non-finite and out-of-range numbers.
fn truncate(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    (t >= -I64_BOUND && t < I64_BOUND).then_some(t as i64)
}

/// Reads the integer at the start of `s`: optional sign, then decimal
/// digits or a `0x` hexadecimal literal.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads the decimal number at the start of `s`, including an optional
/// fraction and exponent.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let fraction = frac_end - (end + 1);
        if mantissa + fraction > 0 {
            mantissa += fraction;
            end = frac_end;
        }
    }
    if mantissa == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}
