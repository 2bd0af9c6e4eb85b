use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::amount::ScaledAmount;

/// Same shape a dynamically typed CSV reader accepts as a float literal
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?([0-9]+\.?|\.[0-9]+|[0-9]+\.[0-9]+)([eE][-+]?[0-9]+)?\s*$").expect("number pattern is valid")
});

/// One address/amount pair; `amount` is always in real (scaled) units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub address: String,
    pub amount: ScaledAmount,
}

impl Row {
    pub fn new<A>(address: A, amount: ScaledAmount) -> Self
    where
        A: Into<String>,
    {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// An untyped cell produced by the tabular splitter
///
/// Every variant keeps its source text, so an address cell that happens to
/// look like a number or a boolean comes back unchanged. Nothing is converted
/// to a float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Empty,
    Bool { value: bool, text: String },
    Number(String),
    Text(String),
}

/// A split line of input
pub type FieldRow = Vec<Field>;

impl Field {
    /// Infer the primitive type of a raw cell
    pub fn infer(raw: &str) -> Self {
        match raw {
            "" => Field::Empty,
            "true" | "TRUE" | "false" | "FALSE" => Field::Bool {
                value: raw.eq_ignore_ascii_case("true"),
                text: raw.to_string(),
            },
            _ if NUMBER.is_match(raw) => Field::Number(raw.to_string()),
            _ => Field::Text(raw.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Number(_))
    }

    /// Numeric and equal to zero (`0`, `0.00`, `-0`, `0e5` ...)
    pub fn is_zero(&self) -> bool {
        match self {
            Field::Number(text) => text
                .split(|c: char| c == 'e' || c == 'E')
                .next()
                .unwrap_or_default()
                .chars()
                .filter(char::is_ascii_digit)
                .all(|c| c == '0'),
            _ => false,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Empty => Ok(()),
            Field::Bool { text, .. } | Field::Number(text) | Field::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_field_types() {
        assert_eq!(Field::infer(""), Field::Empty);
        assert_eq!(
            Field::infer("TRUE"),
            Field::Bool {
                value: true,
                text: "TRUE".to_string(),
            }
        );
        assert!(matches!(Field::infer("false"), Field::Bool { value: false, .. }));
        assert_eq!(Field::infer("100"), Field::Number("100".to_string()));
        assert_eq!(Field::infer(" 1.5e3 "), Field::Number(" 1.5e3 ".to_string()));
        assert_eq!(Field::infer(".5"), Field::Number(".5".to_string()));
        assert_eq!(Field::infer("-2"), Field::Number("-2".to_string()));
        assert_eq!(Field::infer("amount"), Field::Text("amount".to_string()));
        assert_eq!(Field::infer("1,000"), Field::Text("1,000".to_string()));
        assert_eq!(Field::infer("0x1"), Field::Text("0x1".to_string()));
    }

    #[test]
    fn test_large_integers_stay_numeric() {
        let wei = "123456789012345678901234567890";
        assert_eq!(Field::infer(wei), Field::Number(wei.to_string()));
    }

    #[test]
    fn test_non_ascii_digits_are_text() {
        let arabic_indic_ten = "\u{0661}\u{0660}";
        assert_eq!(Field::infer(arabic_indic_ten), Field::Text(arabic_indic_ten.to_string()));
        assert!(!Field::infer(arabic_indic_ten).is_zero());
        assert!(!Field::infer("\u{0661}.5").is_numeric());
    }

    #[test]
    fn test_zero_detection() {
        assert!(Field::infer("0").is_zero());
        assert!(Field::infer("0.000").is_zero());
        assert!(Field::infer("-0").is_zero());
        assert!(Field::infer("0e7").is_zero());
        assert!(!Field::infer("0.01").is_zero());
        assert!(!Field::infer("10e0").is_zero());
        assert!(!Field::Empty.is_zero());
        assert!(!Field::infer("zero").is_zero());
    }

    #[test]
    fn test_display_round_trips_source_text() {
        assert_eq!(Field::infer("0xabc").to_string(), "0xabc");
        assert_eq!(Field::infer("1.50").to_string(), "1.50");
        assert_eq!(Field::infer("TRUE").to_string(), "TRUE");
        assert_eq!(Field::infer("False").to_string(), "False");
        assert_eq!(Field::Empty.to_string(), "");
    }
}
