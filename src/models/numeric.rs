//! Numeric-or-blank field values
//!
//! `amount`, `units` and `pricePerUnit` may be blank, a finite number, or
//! text that never parsed as a number (kept verbatim from stored or imported
//! data). Anything that is not a number counts as blank wherever a number is
//! needed.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// A numeric field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Numeric {
    /// No value
    #[default]
    Blank,
    /// A finite number
    Value(f64),
    /// Text that is not a number
    Text(String),
}

/// Parse a trimmed string as a finite number
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Numeric {
    /// Interpret raw user or file input
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Blank;
        }
        match parse_number(raw) {
            Some(v) => Self::Value(v),
            None => Self::Text(raw.to_string()),
        }
    }

    /// Parse input for a field edit; blank and non-numeric input are rejected
    pub fn parse_required(raw: &str, field: &'static str) -> LedgerResult<Self> {
        parse_number(raw)
            .map(Self::Value)
            .ok_or_else(|| LedgerError::InvalidNumber {
                field,
                value: raw.trim().to_string(),
            })
    }

    /// Parse CSV input, falling back to zero when it is not a number
    pub fn parse_or_zero(raw: &str) -> Self {
        Self::Value(parse_number(raw).unwrap_or(0.0))
    }

    /// The number, if this holds one
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Whether this holds text that never parsed as a number
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Blank
        }
    }
}

impl From<Option<f64>> for Numeric {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Value(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Blank => serializer.serialize_none(),
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
        Ok(Numeric::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
        Ok(Numeric::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
        Ok(Numeric::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
        Ok(Numeric::parse(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Blank)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Blank)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Numeric, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

/// Format an optional amount with two decimals, blank when absent
pub fn format_amount(amount: Option<f64>) -> String {
    amount.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Numeric::parse(""), Numeric::Blank);
        assert_eq!(Numeric::parse("   "), Numeric::Blank);
        assert_eq!(Numeric::parse(" 12.5 "), Numeric::Value(12.5));
        assert_eq!(Numeric::parse("-3"), Numeric::Value(-3.0));
        assert_eq!(Numeric::parse("abc"), Numeric::Text("abc".into()));
        assert_eq!(Numeric::parse("NaN"), Numeric::Text("NaN".into()));
        assert_eq!(Numeric::parse("inf"), Numeric::Text("inf".into()));
    }

    #[test]
    fn test_parse_required() {
        assert_eq!(
            Numeric::parse_required("4", "units").unwrap(),
            Numeric::Value(4.0)
        );
        assert!(matches!(
            Numeric::parse_required("", "units"),
            Err(LedgerError::InvalidNumber { field: "units", .. })
        ));
        assert!(matches!(
            Numeric::parse_required("four", "amount"),
            Err(LedgerError::InvalidNumber { field: "amount", .. })
        ));
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(Numeric::parse_or_zero("7.25"), Numeric::Value(7.25));
        assert_eq!(Numeric::parse_or_zero(""), Numeric::Value(0.0));
        assert_eq!(Numeric::parse_or_zero("null"), Numeric::Value(0.0));
    }

    #[test]
    fn test_value() {
        assert_eq!(Numeric::Value(0.0).value(), Some(0.0));
        assert_eq!(Numeric::Blank.value(), None);
        assert_eq!(Numeric::Text("x".into()).value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Numeric::Value(10.0).to_string(), "10");
        assert_eq!(Numeric::Value(12.5).to_string(), "12.5");
        assert_eq!(Numeric::Blank.to_string(), "");
        assert_eq!(Numeric::Text("n/a".into()).to_string(), "n/a");
    }

    #[test]
    fn test_serde() {
        let values = vec![
            Numeric::Blank,
            Numeric::Value(3.5),
            Numeric::Text("n/a".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,3.5,"n/a"]"#);
        let back: Vec<Numeric> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_deserialize_legacy_shapes() {
        let back: Vec<Numeric> = serde_json::from_str(r#"[3, "", "2", null]"#).unwrap();
        assert_eq!(
            back,
            vec![
                Numeric::Value(3.0),
                Numeric::Blank,
                Numeric::Value(2.0),
                Numeric::Blank
            ]
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Some(3.0)), "3.00");
        assert_eq!(format_amount(Some(12.678)), "12.68");
        assert_eq!(format_amount(None), "");
    }
}
