//! Serde codec for `f64` fields that may carry non-finite values.
//!
//! JSON has no literal for infinity or NaN, so `serde_json` would turn them
//! into `null` and the value would be lost on the way back. Finite numbers
//! stay plain JSON numbers; non-finite ones travel as the strings
//! `"Infinity"`, `"-Infinity"` and `"NaN"`. On input `null` reads as NaN.
//!
//! Use with `#[serde(with = "distcalc_core::number")]`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(Repr::Number(n)) => Ok(n),
        Some(Repr::Text(s)) => parse_text(&s).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"a number, \"Infinity\", \"-Infinity\" or \"NaN\"")
        }),
    }
}

fn parse_text(s: &str) -> Option<f64> {
    match s.trim().to_ascii_lowercase().as_str() {
        "infinity" | "+infinity" | "inf" | "+inf" => Some(f64::INFINITY),
        "-infinity" | "-inf" => Some(f64::NEG_INFINITY),
        "nan" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "crate::number")]
        value: f64,
    }

    fn encode(value: f64) -> String {
        serde_json::to_string(&Holder { value }).unwrap()
    }

    fn decode(json: &str) -> f64 {
        serde_json::from_str::<Holder>(json).unwrap().value
    }

    #[test]
    fn finite_values_stay_numbers() {
        assert_eq!(encode(14.0), r#"{"value":14.0}"#);
        assert_eq!(decode(r#"{"value":14}"#), 14.0);
        assert_eq!(decode(r#"{"value":-2.5}"#), -2.5);
    }

    #[test]
    fn infinities_travel_as_strings() {
        assert_eq!(encode(f64::INFINITY), r#"{"value":"Infinity"}"#);
        assert_eq!(encode(f64::NEG_INFINITY), r#"{"value":"-Infinity"}"#);
        assert_eq!(decode(r#"{"value":"Infinity"}"#), f64::INFINITY);
        assert_eq!(decode(r#"{"value":"-Infinity"}"#), f64::NEG_INFINITY);
    }

    #[test]
    fn nan_and_null_read_as_nan() {
        assert_eq!(encode(f64::NAN), r#"{"value":"NaN"}"#);
        assert!(decode(r#"{"value":"NaN"}"#).is_nan());
        assert!(decode(r#"{"value":null}"#).is_nan());
    }

    #[test]
    fn rejects_words() {
        assert!(serde_json::from_str::<Holder>(r#"{"value":"twelve"}"#).is_err());
    }
}
