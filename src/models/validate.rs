//! Schema checks applied to collaborator responses after decoding

use serde::{Deserialize, Deserializer};

/// Structural check run on every decoded record before it reaches a deriver
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), String> {
        for (i, item) in self.iter().enumerate() {
            item.validate().map_err(|e| format!("record {}: {}", i, e))?;
        }
        Ok(())
    }
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} is not a finite number", field));
    }
    if value < 0.0 {
        return Err(format!("{} is negative ({})", field, value));
    }
    Ok(())
}

pub(crate) fn non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is empty", field));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `12.5`, `"12.5"` and `null` (as 0); anything else is rejected
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(0.0),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

/// Integer amounts arrive as JSON numbers or decimal strings
pub(crate) fn integer_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok("0".to_string()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "lenient_f64", default)]
        amount: f64,
    }

    #[test]
    fn lenient_f64_accepts_strings_and_null() {
        let a: Probe = serde_json::from_str(r#"{"amount":"12.5"}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"amount":null}"#).unwrap();
        let c: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.amount, 12.5);
        assert_eq!(b.amount, 0.0);
        assert_eq!(c.amount, 0.0);
        assert!(serde_json::from_str::<Probe>(r#"{"amount":"lots"}"#).is_err());
    }

    #[test]
    fn negative_values_fail_validation() {
        assert!(non_negative("usdPrice", -1.0).is_err());
        assert!(non_negative("usdPrice", f64::NAN).is_err());
        assert!(non_negative("usdPrice", 0.0).is_ok());
    }
}
