//! The editable address/amount dataset.
//!
//! Rows are identified by position. Any deletion shifts every later index down
//! by one, so callers must not hold on to indices across mutations.
//!
//! Every mutation computes the new total before touching the rows, so a
//! mutation that fails (overflow, stale index) leaves the list exactly as it
//! was.

use crate::domain::error::{CsvHandlerError, Result};
use crate::domain::models::{Row, ScalePrecision, ScaledAmount};
use crate::domain::rescale::RescaleCoordinator;
use crate::domain::total::TotalAggregator;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowList {
    rows: Vec<Row>,
    total: ScaledAmount,
}

impl RowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let total = TotalAggregator::total(&rows)?;
        Ok(Self { rows, total })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact sum of all amounts in real units
    pub fn total(&self) -> &ScaledAmount {
        &self.total
    }

    /// Replace every row at once
    pub fn replace_all(&mut self, rows: Vec<Row>) -> Result<()> {
        let total = TotalAggregator::total(&rows)?;
        self.rows = rows;
        self.total = total;
        Ok(())
    }

    /// Rows coming out of a parse always replace the list wholesale
    pub fn insert_from_parse(&mut self, rows: Vec<Row>) -> Result<()> {
        self.replace_all(rows)
    }

    /// Remove row `index`, shifting later rows down by one
    pub fn delete_at(&mut self, index: usize) -> Result<Row> {
        self.check_index(index)?;
        let removed = self.rows.remove(index);
        // the remaining rows summed without overflow before, so they still do
        self.total = TotalAggregator::total(&self.rows)?;
        Ok(removed)
    }

    /// Overwrite both fields of row `index`
    ///
    /// `amount` must already be in real units, converted from what the user typed.
    pub fn edit_at(&mut self, index: usize, address: String, amount: ScaledAmount) -> Result<()> {
        self.check_index(index)?;
        let mut rows = self.rows.clone();
        rows[index] = Row { address, amount };
        let total = TotalAggregator::total(&rows)?;
        self.rows = rows;
        self.total = total;
        Ok(())
    }

    /// Rewrite every amount for a new scale precision in one pass
    pub fn rescale(&mut self, from: ScalePrecision, to: ScalePrecision) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let rows = RescaleCoordinator::rescale(&self.rows, from, to)?;
        self.replace_all(rows)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(CsvHandlerError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}
