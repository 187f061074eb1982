//! Lenient serde adapters for client-supplied scalars
//!
//! Frontends are loose about scalar types: an invoice number typed into a
//! numeric input arrives as `123`, a price read from a text field arrives as
//! `"10"`. These adapters accept both shapes and normalize to the field's
//! Rust type. Numbers are written back the way a browser prints them, so an
//! integral price goes out as `10` rather than `10.0`.

use serde_json::Number;

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whether `value` should be written as a JSON integer
fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

/// Render a JSON number as text (`123`, `1.5`, `10` for `10.0`)
pub fn number_to_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if !number.is_i64() && !number.is_u64() && is_integral(value) => {
            (value as i64).to_string()
        }
        _ => number.to_string(),
    }
}

/// Parse a numeric string; blank means absent
pub fn text_to_number(text: &str) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("invalid number: \"{}\"", text)),
    }
}

/// Optional text field that also accepts numbers and booleans
pub mod text {
    use super::number_to_text;
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(number_to_text(&n))),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected a string or number, got {}",
                other
            ))),
        }
    }
}

/// Optional number that also accepts numeric strings and serializes
/// integral values as integers
pub mod number {
    use super::{is_integral, text_to_number};
    use serde::de::{Deserializer, Error};
    use serde::{Deserialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) if is_integral(*v) => serializer.serialize_i64(*v as i64),
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) => text_to_number(&s).map_err(D::Error::custom),
            Some(other) => Err(D::Error::custom(format!("expected a number, got {}", other))),
        }
    }
}
