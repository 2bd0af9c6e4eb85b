//! Exact amounts and scale precision.
//!
//! Amounts are never floats. A `ScaledAmount` is a 256-bit unsigned count of
//! units plus the number of fractional digits those units carry, so that every
//! base-10 shift (display to real, rescaling) is exact.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::{CsvHandlerError, Result};

/// Largest power of ten that fits in 256 bits
pub const MAX_POW10: u32 = 77;

/// `10^n`, or `Overflow` when it does not fit in 256 bits
pub fn pow10(n: u32) -> Result<U256> {
    if n > MAX_POW10 {
        return Err(CsvHandlerError::Overflow(format!("10^{} does not fit", n)));
    }
    Ok(U256::exp10(n as usize))
}

/// Number of fractional digits implied by real amounts (a token's decimals)
///
/// real amount = display amount × 10^d
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScalePrecision(u32);

impl ScalePrecision {
    pub const MAX: u32 = MAX_POW10;

    pub fn new(digits: u32) -> Result<Self> {
        if digits > Self::MAX {
            return Err(CsvHandlerError::ScaleOutOfRange {
                scale: digits,
                max: Self::MAX,
            });
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ScalePrecision {
    type Error = CsvHandlerError;

    fn try_from(digits: u32) -> Result<Self> {
        Self::new(digits)
    }
}

impl From<ScalePrecision> for u32 {
    fn from(scale: ScalePrecision) -> u32 {
        scale.0
    }
}

impl fmt::Display for ScalePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exact non-negative decimal: `units / 10^fraction_digits`
///
/// Always normalized: when `fraction_digits > 0` the units never end in a zero,
/// and zero is stored as `0` with no fractional digits. Structural equality is
/// therefore value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScaledAmount {
    units: U256,
    fraction_digits: u32,
}

impl ScaledAmount {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Integral amount of `units`
    pub fn from_units(units: U256) -> Self {
        Self {
            units,
            fraction_digits: 0,
        }
    }

    pub fn new(units: U256, fraction_digits: u32) -> Self {
        let mut amount = Self {
            units,
            fraction_digits,
        };
        amount.normalize();
        amount
    }

    fn normalize(&mut self) {
        if self.units.is_zero() {
            self.fraction_digits = 0;
            return;
        }
        let ten = U256::from(10u8);
        while self.fraction_digits > 0 {
            let (quotient, remainder) = self.units.div_mod(ten);
            if !remainder.is_zero() {
                break;
            }
            self.units = quotient;
            self.fraction_digits -= 1;
        }
    }

    pub fn units(&self) -> U256 {
        self.units
    }

    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    pub fn is_zero(&self) -> bool {
        self.units.is_zero()
    }

    pub fn is_integral(&self) -> bool {
        self.fraction_digits == 0
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Ok(*self);
        }
        if self.is_zero() {
            return Ok(*other);
        }
        let digits = self.fraction_digits.max(other.fraction_digits);
        let lhs = self.units_at(digits)?;
        let rhs = other.units_at(digits)?;
        let units = lhs
            .checked_add(rhs)
            .ok_or_else(|| CsvHandlerError::Overflow(format!("{} + {}", self, other)))?;
        Ok(Self::new(units, digits))
    }

    /// Units re-expressed with `digits` fractional digits (`digits >= fraction_digits`)
    fn units_at(&self, digits: u32) -> Result<U256> {
        let factor = pow10(digits - self.fraction_digits)?;
        self.units
            .checked_mul(factor)
            .ok_or_else(|| CsvHandlerError::Overflow(format!("{} at {} fractional digits", self, digits)))
    }

    /// Multiply by `10^places` (divide when `places` is negative); never rounds
    pub fn shift(&self, places: i64) -> Result<Self> {
        if self.is_zero() || places == 0 {
            return Ok(*self);
        }
        if places < 0 {
            let extra = u32::try_from(places.unsigned_abs())
                .ok()
                .and_then(|extra| self.fraction_digits.checked_add(extra))
                .ok_or_else(|| CsvHandlerError::Overflow(format!("{} shifted by {}", self, places)))?;
            return Ok(Self::new(self.units, extra));
        }

        let places = u64::try_from(places).unwrap_or(u64::MAX);
        if places <= u64::from(self.fraction_digits) {
            return Ok(Self::new(self.units, self.fraction_digits - places as u32));
        }
        let remaining = places - u64::from(self.fraction_digits);
        let factor = u32::try_from(remaining)
            .map_err(|_| CsvHandlerError::Overflow(format!("{} shifted by {}", self, places)))
            .and_then(pow10)?;
        let units = self
            .units
            .checked_mul(factor)
            .ok_or_else(|| CsvHandlerError::Overflow(format!("{} shifted by {}", self, places)))?;
        Ok(Self::from_units(units))
    }

    /// Parse a non-negative decimal as typed by a person
    ///
    /// Accepts an optional leading `+`, thousands separators in the integer part
    /// (`1,234.5`), and an exponent (`1.5e3`). Surrounding whitespace is ignored.
    pub fn parse_decimal(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(CsvHandlerError::invalid_amount(input, "amount is empty"));
        }
        if text.starts_with('-') {
            return Err(CsvHandlerError::invalid_amount(input, "amount must not be negative"));
        }
        let text = text.strip_prefix('+').unwrap_or(text);

        let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent = text[pos + 1..]
                    .parse::<i64>()
                    .map_err(|_| CsvHandlerError::invalid_amount(input, "malformed exponent"))?;
                (&text[..pos], exponent)
            }
            None => (text, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CsvHandlerError::invalid_amount(input, "no digits"));
        }
        let int_digits = strip_grouping(int_part)
            .ok_or_else(|| CsvHandlerError::invalid_amount(input, "misplaced thousands separator"))?;
        if !int_digits.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CsvHandlerError::invalid_amount(input, "not a decimal number"));
        }

        let frac_digits = frac_part.trim_end_matches('0');
        let digits = format!("{}{}", int_digits, frac_digits);
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        let units = U256::from_dec_str(digits)
            .map_err(|_| CsvHandlerError::Overflow(format!("'{}' has too many digits", input.trim())))?;
        Self::new(units, frac_digits.len() as u32).shift(exponent)
    }
}

/// Remove thousands separators, checking they sit on 3-digit boundaries
fn strip_grouping(int_part: &str) -> Option<String> {
    if !int_part.contains(',') {
        return Some(int_part.to_string());
    }
    let mut groups = int_part.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.units.to_string();
        if self.fraction_digits == 0 {
            return f.write_str(&digits);
        }
        let width = self.fraction_digits as usize + 1;
        let padded = format!("{:0>width$}", digits, width = width);
        let (int_part, frac_part) = padded.split_at(padded.len() - self.fraction_digits as usize);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

impl FromStr for ScaledAmount {
    type Err = CsvHandlerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_decimal(s)
    }
}

impl Serialize for ScaledAmount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScaledAmount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        ScaledAmount::parse_decimal(&text).map_err(de::Error::custom)
    }
}
