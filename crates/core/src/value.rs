//! Loosely-typed field values.
//!
//! Order totals and product custom fields come back from the platform as
//! whatever was stored: a number, a numeric string, an empty string, or
//! nothing at all. `FieldValue` keeps that shape and answers the two
//! questions the profit calculation asks of it: "is it numeric?" and "is it
//! truthy?".

use serde::{Deserialize, Serialize};

/// A value as stored by the platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Numeric reading of the value, if it is numeric.
    ///
    /// Finite numbers are numeric. Text is numeric when, after trimming ASCII
    /// whitespace, it is a plain decimal numeral with an optional sign,
    /// fraction and exponent (`"20"`, `" -1.5 "`, `".5"`, `"1e3"`). Hex,
    /// `inf`, `nan`, digit separators and booleans are not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// The value, or `0.0` when it is not numeric.
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Platform truthiness: `null`, `false`, `0`, `""` and `"0"` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !(s.is_empty() || s == "0"),
        }
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    let well_formed = s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_text_is_numeric() {
        assert_eq!(FieldValue::text("20").as_number(), Some(20.0));
        assert_eq!(FieldValue::text(" -1.5\n").as_number(), Some(-1.5));
        assert_eq!(FieldValue::text(".5").as_number(), Some(0.5));
        assert_eq!(FieldValue::text("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        for raw in ["", " ", "abc", "0x1A", "inf", "NaN", "1_000", "12,50", "1e", "--1"] {
            assert_eq!(FieldValue::text(raw).as_number(), None, "{raw:?}");
        }
        assert_eq!(FieldValue::Null.as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
        assert_eq!(FieldValue::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn truthiness_follows_platform_rules() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::text("").is_truthy());
        assert!(!FieldValue::text("0").is_truthy());
        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(FieldValue::text("0.0").is_truthy());
        assert!(FieldValue::text("abc").is_truthy());
        assert!(FieldValue::Number(0.01).is_truthy());
    }

    #[test]
    fn deserializes_loose_json_shapes() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, "", "20", 12.5, true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::text(""),
                FieldValue::text("20"),
                FieldValue::Number(12.5),
                FieldValue::Bool(true),
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: any finite number printed as text reads back as the same number.
        #[test]
        fn printed_numbers_are_numeric(n in -1.0e9f64..1.0e9f64) {
            let value = FieldValue::text(n.to_string());
            prop_assert_eq!(value.as_number(), Some(n));
        }
    }
}
