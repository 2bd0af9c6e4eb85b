//! Exact total over a row list.

use crate::domain::error::Result;
use crate::domain::models::{Row, ScaledAmount};

#[derive(Debug, Clone, Copy, Default)]
pub struct TotalAggregator;

impl TotalAggregator {
    /// Sum of every row's amount in real units, recomputed from scratch
    pub fn total(rows: &[Row]) -> Result<ScaledAmount> {
        rows.iter()
            .try_fold(ScaledAmount::zero(), |acc, row| acc.checked_add(&row.amount))
    }
}
