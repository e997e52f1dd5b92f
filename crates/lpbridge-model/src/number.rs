use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Magnitude at or above which the solver treats a value as infinite
pub const INFINITY_SENTINEL: f64 = 1e30;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid number: {0:?} (expected a number or one of inf, -inf, infinity, -infinity)")]
pub struct InvalidNumber(pub String);

/// Map sentinel magnitudes onto real infinities, leaving other values untouched
pub fn from_sentinel(value: f64) -> f64 {
    if value >= INFINITY_SENTINEL {
        f64::INFINITY
    } else if value <= -INFINITY_SENTINEL {
        f64::NEG_INFINITY
    } else {
        value
    }
}

/// Parse the textual spellings of infinity accepted in JSON documents
pub fn parse_infinity(text: &str) -> Result<f64, InvalidNumber> {
    match text.trim().to_ascii_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => Ok(f64::INFINITY),
        "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
        _ => Err(InvalidNumber(text.to_string())),
    }
}

/// JSON cannot carry infinities, so numbers may also arrive as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
}

impl NumberRepr {
    fn into_f64(self) -> Result<f64, InvalidNumber> {
        match self {
            NumberRepr::Number(n) => Ok(n),
            NumberRepr::Text(text) => parse_infinity(&text),
        }
    }
}

pub(crate) fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberRepr::deserialize(deserializer)?
        .into_f64()
        .map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberRepr>::deserialize(deserializer)?
        .map(|repr| repr.into_f64().map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_maps_to_infinity() {
        assert_eq!(from_sentinel(1e30), f64::INFINITY);
        assert_eq!(from_sentinel(-1e31), f64::NEG_INFINITY);
        assert_eq!(from_sentinel(1e29), 1e29);
        assert_eq!(from_sentinel(-3.5), -3.5);
    }

    #[test]
    fn test_parse_infinity_spellings() {
        assert_eq!(parse_infinity("inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_infinity(" Infinity ").unwrap(), f64::INFINITY);
        assert_eq!(parse_infinity("-INF").unwrap(), f64::NEG_INFINITY);
        assert!(parse_infinity("NaN").is_err());
        assert_eq!(
            parse_infinity("lots"),
            Err(InvalidNumber("lots".to_string()))
        );
    }
}
