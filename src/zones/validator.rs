//! Level-update validation.
//!
//! # Responsibilities
//! - Decode an untyped JSON payload into four numeric levels
//! - Enforce `GREEN < YELLOW < RED <= MAX`
//!
//! # Design Decisions
//! - Decoding is a typed serde step; any shape mismatch is `InvalidInput`
//! - Numeric strings are accepted, booleans and nulls are not
//! - Pure function: never touches shared state

use serde::Deserialize;
use serde_json::Value;

use crate::zones::error::ZoneError;
use crate::zones::levels::Levels;

/// A single level as it may arrive on the wire.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LevelValue {
    Number(f64),
    Text(String),
}

impl LevelValue {
    fn to_finite(&self) -> Option<f64> {
        let value = match self {
            LevelValue::Number(n) => *n,
            LevelValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Deserialize)]
struct LevelsPayload {
    #[serde(rename = "GREEN")]
    green: Option<LevelValue>,
    #[serde(rename = "YELLOW")]
    yellow: Option<LevelValue>,
    #[serde(rename = "RED")]
    red: Option<LevelValue>,
    #[serde(rename = "MAX")]
    max: Option<LevelValue>,
}

fn required(field: &Option<LevelValue>) -> Result<f64, ZoneError> {
    field
        .as_ref()
        .and_then(LevelValue::to_finite)
        .ok_or(ZoneError::InvalidInput)
}

/// Validate a level-update payload and return the candidate levels.
pub fn validate(payload: &Value) -> Result<Levels, ZoneError> {
    // serde would otherwise decode a 4-element array positionally.
    if !payload.is_object() {
        return Err(ZoneError::InvalidInput);
    }
    let decoded = LevelsPayload::deserialize(payload).map_err(|_| ZoneError::InvalidInput)?;

    let levels = Levels {
        green: required(&decoded.green)?,
        yellow: required(&decoded.yellow)?,
        red: required(&decoded.red)?,
        max: required(&decoded.max)?,
    };

    if !levels.is_ordered() {
        return Err(ZoneError::InvalidOrdering);
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_levels_round_trip() {
        let levels = validate(&json!({"GREEN": -20.5, "YELLOW": -9, "RED": -4.25, "MAX": 3})).unwrap();
        assert_eq!(levels, Levels { green: -20.5, yellow: -9.0, red: -4.25, max: 3.0 });
    }

    #[test]
    fn test_red_equal_max_is_valid() {
        let levels = validate(&json!({"GREEN": -3, "YELLOW": -2, "RED": -1, "MAX": -1})).unwrap();
        assert_eq!(levels.red, levels.max);
    }

    #[test]
    fn test_red_above_max_is_invalid() {
        let result = validate(&json!({"GREEN": -3, "YELLOW": -2, "RED": 1, "MAX": 0}));
        assert_eq!(result, Err(ZoneError::InvalidOrdering));
    }

    #[test]
    fn test_reversed_order() {
        let result = validate(&json!({"GREEN": 0, "YELLOW": -1, "RED": -2, "MAX": -2}));
        assert_eq!(result, Err(ZoneError::InvalidOrdering));
    }

    #[test]
    fn test_equal_strict_levels_rejected() {
        let result = validate(&json!({"GREEN": -5, "YELLOW": -5, "RED": -3, "MAX": 0}));
        assert_eq!(result, Err(ZoneError::InvalidOrdering));
        let result = validate(&json!({"GREEN": -10, "YELLOW": -3, "RED": -3, "MAX": 0}));
        assert_eq!(result, Err(ZoneError::InvalidOrdering));
    }

    #[test]
    fn test_missing_field() {
        let result = validate(&json!({"GREEN": -10, "YELLOW": -5, "RED": -3}));
        assert_eq!(result, Err(ZoneError::InvalidInput));
        assert_eq!(validate(&json!({})), Err(ZoneError::InvalidInput));
    }

    #[test]
    fn test_non_numeric_values() {
        let bad = [
            json!({"GREEN": "x", "YELLOW": -5, "RED": -3, "MAX": 0}),
            json!({"GREEN": null, "YELLOW": -5, "RED": -3, "MAX": 0}),
            json!({"GREEN": true, "YELLOW": -5, "RED": -3, "MAX": 0}),
            json!({"GREEN": [1], "YELLOW": -5, "RED": -3, "MAX": 0}),
            json!({"GREEN": "inf", "YELLOW": -5, "RED": -3, "MAX": 0}),
            json!({"GREEN": "NaN", "YELLOW": -5, "RED": -3, "MAX": 0}),
        ];
        for payload in bad {
            assert_eq!(validate(&payload), Err(ZoneError::InvalidInput), "{payload}");
        }
    }

    #[test]
    fn test_non_object_payload() {
        assert_eq!(validate(&json!([1, 2, 3, 4])), Err(ZoneError::InvalidInput));
        assert_eq!(validate(&json!("levels")), Err(ZoneError::InvalidInput));
    }

    #[test]
    fn test_numeric_strings_and_extra_fields() {
        let levels = validate(&json!({
            "GREEN": " -12 ",
            "YELLOW": "-6.5",
            "RED": -2,
            "MAX": "0",
            "NOTE": "ignored"
        }))
        .unwrap();
        assert_eq!(levels, Levels { green: -12.0, yellow: -6.5, red: -2.0, max: 0.0 });
    }
}
