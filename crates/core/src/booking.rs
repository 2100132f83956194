//! Booking rules.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Status assigned to a new booking.
pub const DEFAULT_STATUS: &str = "Confirmed";

/// Serde adapter for fields stored as text but sent as either a JSON
/// string or a JSON number (the booking form submits `age` both ways).
///
/// A missing or `null` field becomes an empty string so the blank check
/// reports it as missing.
pub fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct AgeHolder {
        #[serde(default, deserialize_with = "deserialize_text_or_number")]
        age: String,
    }

    fn age(json: &str) -> Result<String, serde_json::Error> {
        serde_json::from_str::<AgeHolder>(json).map(|h| h.age)
    }

    #[test]
    fn accepts_string_and_number() {
        assert_eq!(age(r#"{"age": "42"}"#).unwrap(), "42");
        assert_eq!(age(r#"{"age": 42}"#).unwrap(), "42");
    }

    #[test]
    fn missing_and_null_become_empty() {
        assert_eq!(age("{}").unwrap(), "");
        assert_eq!(age(r#"{"age": null}"#).unwrap(), "");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(age(r#"{"age": [42]}"#).is_err());
        assert!(age(r#"{"age": true}"#).is_err());
    }
}
