use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Invalid {expected} value for '{key}': '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),
}

/// Splits a `KEY=VALUE` override at the first `=`; both sides are trimmed and the key must be non-empty.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

pub fn parse_value<T: std::str::FromStr>(
    key: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}

/// Parses the `--metadata` argument. Any JSON value is accepted; no argument means `{}`.
pub fn parse_metadata(raw: Option<&str>) -> Result<Value, ParseError> {
    match raw {
        None => Ok(Value::Object(Map::new())),
        Some(text) => {
            serde_json::from_str(text).map_err(|e| ParseError::InvalidMetadata(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("charges.params-path=a=b.toml").unwrap(),
            ("charges.params-path", "a=b.toml")
        );
        assert_eq!(
            parse_key_value(" conformer.seed = 7 ").unwrap(),
            ("conformer.seed", "7")
        );
    }

    #[test]
    fn key_value_rejects_missing_parts() {
        assert!(matches!(
            parse_key_value("no-equals-sign"),
            Err(ParseError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            parse_key_value("=0.2"),
            Err(ParseError::InvalidKeyValue(_))
        ));
    }

    #[test]
    fn typed_values_report_the_key() {
        let parsed: f64 = parse_value("classifier.polarity-threshold", "0.25", "float").unwrap();
        assert_eq!(parsed, 0.25);

        let err = parse_value::<usize>("charges.iterations", "many", "integer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid integer value for 'charges.iterations': 'many'"
        );
    }

    #[test]
    fn metadata_defaults_to_empty_object() {
        assert_eq!(parse_metadata(None).unwrap(), json!({}));
        assert_eq!(
            parse_metadata(Some(r#"{"job": 4, "tags": ["a"]}"#)).unwrap(),
            json!({"job": 4, "tags": ["a"]})
        );
        assert!(parse_metadata(Some("{broken")).is_err());
    }
}
