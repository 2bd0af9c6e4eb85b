//! Rescaling of stored real amounts when the scale precision changes.
//!
//! `new = old / 10^from × 10^to`, done as a single decimal-point shift so no
//! remainder is ever truncated. Scaling down and back up restores the original
//! amounts exactly.

use tracing::debug;

use crate::domain::error::Result;
use crate::domain::models::{Row, ScalePrecision};

#[derive(Debug, Clone, Copy, Default)]
pub struct RescaleCoordinator;

impl RescaleCoordinator {
    /// Rescaled copies of `rows`; either every row converts or none does
    pub fn rescale(rows: &[Row], from: ScalePrecision, to: ScalePrecision) -> Result<Vec<Row>> {
        if from == to {
            return Ok(rows.to_vec());
        }
        let places = i64::from(to.digits()) - i64::from(from.digits());
        debug!("Rescaling {} rows from {} to {} ({:+} places)", rows.len(), from, to, places);

        rows.iter()
            .map(|row| {
                Ok(Row {
                    address: row.address.clone(),
                    amount: row.amount.shift(places)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CsvHandlerError;

    fn scale(d: u32) -> ScalePrecision {
        ScalePrecision::new(d).unwrap()
    }

    fn rows(amounts: &[&str]) -> Vec<Row> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| Row::new(format!("0x{}", i), a.parse().unwrap()))
            .collect()
    }

    fn amounts(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.amount.to_string()).collect()
    }

    #[test]
    fn test_scale_up() {
        let scaled = RescaleCoordinator::rescale(&rows(&["150", "1"]), scale(2), scale(6)).unwrap();
        assert_eq!(amounts(&scaled), vec!["1500000", "10000"]);
    }

    #[test]
    fn test_scale_down_keeps_remainders() {
        let scaled = RescaleCoordinator::rescale(&rows(&["123456", "7"]), scale(6), scale(2)).unwrap();
        assert_eq!(amounts(&scaled), vec!["12.3456", "0.0007"]);
    }

    #[test]
    fn test_round_trip_has_no_drift() {
        let original = rows(&["1", "123456789", "1000000000000000000", "0"]);
        for (a, b) in [(18, 0), (0, 18), (6, 2), (2, 9), (30, 1)] {
            let there = RescaleCoordinator::rescale(&original, scale(a), scale(b)).unwrap();
            let back = RescaleCoordinator::rescale(&there, scale(b), scale(a)).unwrap();
            assert_eq!(back, original, "{} -> {} -> {}", a, b, a);
        }
    }

    #[test]
    fn test_same_scale_is_noop() {
        let original = rows(&["5", "6"]);
        assert_eq!(RescaleCoordinator::rescale(&original, scale(4), scale(4)).unwrap(), original);
    }

    #[test]
    fn test_overflow_fails_whole_pass() {
        let original = rows(&["1", "100000000000000000000000000000000000000000000000000000000000000000000000"]);
        let result = RescaleCoordinator::rescale(&original, scale(0), scale(20));
        assert!(matches!(result, Err(CsvHandlerError::Overflow(_))));
    }
}
