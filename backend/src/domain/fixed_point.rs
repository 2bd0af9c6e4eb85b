//! Fixed-point conversion between display amounts and real amounts.
//!
//! `real = display × 10^scale`. Both directions are exact base-10 shifts, and
//! display keeps every fractional digit unless `DisplayConfig::max_fraction_digits`
//! caps it.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::models::{ScalePrecision, ScaledAmount};

/// Fractional digits kept by `insert_commas`
pub const INSERT_COMMAS_FRACTION_DIGITS: u32 = 18;

/// Display formatting options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Truncate displayed amounts to this many fractional digits
    ///
    /// A capped display no longer converts back to the same real amount.
    pub max_fraction_digits: Option<u32>,
}

/// Convert a display amount (`"1,234.56"`) to real units
pub fn to_real(display: &str, scale: ScalePrecision) -> Result<ScaledAmount> {
    ScaledAmount::parse_decimal(display)?.shift(i64::from(scale.digits()))
}

/// Convert a real amount to a grouped display string (`123456` at scale 2 is `"1,234.56"`)
pub fn to_display(real: &ScaledAmount, scale: ScalePrecision) -> String {
    format_display(real, scale, &DisplayConfig::default())
}

/// Format an already computed decimal string with thousands separators
///
/// Keeps up to 18 fractional digits, dropping trailing zeros.
pub fn insert_commas(number: &str) -> Result<String> {
    let text = number.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let amount = ScaledAmount::parse_decimal(unsigned)?;
    let capped = DisplayConfig {
        max_fraction_digits: Some(INSERT_COMMAS_FRACTION_DIGITS),
    };
    let formatted = format_display(&amount, ScalePrecision::default(), &capped);
    if negative && !amount.is_zero() {
        Ok(format!("-{}", formatted))
    } else {
        Ok(formatted)
    }
}

fn format_display(real: &ScaledAmount, scale: ScalePrecision, config: &DisplayConfig) -> String {
    let (int_part, frac_part) = decimal_parts(real, scale);
    let keep = match config.max_fraction_digits {
        Some(max) => frac_part.len().min(max as usize),
        None => frac_part.len(),
    };
    let frac_part = frac_part[..keep].trim_end_matches('0');
    join(&group_thousands(&int_part), frac_part)
}

fn format_fixed(real: &ScaledAmount, scale: ScalePrecision, fixed: u32) -> String {
    let (int_part, frac_part) = decimal_parts(real, scale);
    let fixed = fixed as usize;
    let frac_part = if frac_part.len() >= fixed {
        frac_part[..fixed].to_string()
    } else {
        format!("{:0<width$}", frac_part, width = fixed)
    };
    join(&group_thousands(&int_part), &frac_part)
}

fn join(int_part: &str, frac_part: &str) -> String {
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Integer and fractional digit strings of `real / 10^scale`
fn decimal_parts(real: &ScaledAmount, scale: ScalePrecision) -> (String, String) {
    let digits = real.units().to_string();
    let fraction_digits = real.fraction_digits() as usize + scale.digits() as usize;
    if fraction_digits == 0 {
        return (digits, String::new());
    }
    let padded = format!("{:0>width$}", digits, width = fraction_digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - fraction_digits);
    (int_part.to_string(), frac_part.to_string())
}

fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Converters bound to one scale precision and display configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Formatters {
    scale: ScalePrecision,
    display: DisplayConfig,
}

impl Formatters {
    pub fn new(scale: ScalePrecision) -> Self {
        Self::with_config(scale, DisplayConfig::default())
    }

    pub fn with_config(scale: ScalePrecision, display: DisplayConfig) -> Self {
        Self { scale, display }
    }

    pub fn scale(&self) -> ScalePrecision {
        self.scale
    }

    pub fn to_real(&self, display: &str) -> Result<ScaledAmount> {
        to_real(display, self.scale)
    }

    pub fn to_display(&self, real: &ScaledAmount) -> String {
        format_display(real, self.scale, &self.display)
    }

    /// Display with exactly `fixed` fractional digits, truncating or zero-padding
    pub fn to_display_fixed(&self, real: &ScaledAmount, fixed: u32) -> String {
        format_fixed(real, self.scale, fixed)
    }
}
