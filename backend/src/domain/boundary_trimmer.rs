//! Header and footer removal for uploaded address lists.
//!
//! A row counts as data when its second field is numeric and non-zero. One
//! leading non-data row is treated as a header; trailing rows are dropped while
//! they are not data. A legitimate zero-amount last row is indistinguishable
//! from filler and is dropped as well.

use tracing::debug;

use crate::domain::models::{Field, FieldRow};

/// What the trimmer removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimReport {
    pub header_removed: bool,
    pub trailing_removed: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryTrimmer;

impl BoundaryTrimmer {
    pub fn new() -> Self {
        Self
    }

    /// Drop the header row and trailing non-data rows in place
    ///
    /// Trimming down to nothing is a valid outcome, not an error.
    pub fn trim(&self, rows: &mut Vec<FieldRow>) -> TrimReport {
        let mut report = TrimReport::default();

        if rows.first().is_some_and(|row| !Self::amount_is_numeric(row)) {
            rows.remove(0);
            report.header_removed = true;
        }

        while let Some(last) = rows.last() {
            if Self::amount_is_numeric(last) && !Self::amount_field(last).is_some_and(Field::is_zero) {
                break;
            }
            rows.pop();
            report.trailing_removed += 1;
        }

        debug!(
            "Trimmed rows: header_removed={}, trailing_removed={}, remaining={}",
            report.header_removed,
            report.trailing_removed,
            rows.len()
        );
        report
    }

    fn amount_field(row: &FieldRow) -> Option<&Field> {
        row.get(1)
    }

    fn amount_is_numeric(row: &FieldRow) -> bool {
        Self::amount_field(row).is_some_and(Field::is_numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<FieldRow> {
        data.iter()
            .map(|row| row.iter().map(|raw| Field::infer(raw)).collect())
            .collect()
    }

    #[test]
    fn test_drops_header_and_zero_footer() {
        let mut data = rows(&[&["addr", "amt"], &["0x1", "100"], &["0x2", "0"]]);
        let report = BoundaryTrimmer::new().trim(&mut data);

        assert_eq!(data, rows(&[&["0x1", "100"]]));
        assert_eq!(
            report,
            TrimReport {
                header_removed: true,
                trailing_removed: 1,
            }
        );
    }

    #[test]
    fn test_keeps_clean_data() {
        let mut data = rows(&[&["0x1", "1"], &["0x2", "2"]]);
        let report = BoundaryTrimmer::new().trim(&mut data);

        assert_eq!(data.len(), 2);
        assert_eq!(report, TrimReport::default());
    }

    #[test]
    fn test_removes_only_one_header_row() {
        let mut data = rows(&[&["title", "list"], &["addr", "amt"], &["0x1", "5"]]);
        BoundaryTrimmer::new().trim(&mut data);

        assert_eq!(data, rows(&[&["addr", "amt"], &["0x1", "5"]]));
    }

    #[test]
    fn test_removes_garbage_footer_repeatedly() {
        let mut data = rows(&[&["0x1", "5"], &["0x2", "0.00"], &["total"], &["", ""], &["note", "n/a"]]);
        let report = BoundaryTrimmer::new().trim(&mut data);

        assert_eq!(data, rows(&[&["0x1", "5"]]));
        assert_eq!(report.trailing_removed, 4);
    }

    #[test]
    fn test_zero_rows_in_the_middle_survive() {
        let mut data = rows(&[&["0x1", "0"], &["0x2", "3"]]);
        BoundaryTrimmer::new().trim(&mut data);

        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_all_non_numeric_trims_to_empty() {
        let mut data = rows(&[&["addr", "amt"], &["0x1", "lots"], &["0x2", "many"]]);
        let report = BoundaryTrimmer::new().trim(&mut data);

        assert!(data.is_empty());
        assert!(report.header_removed);
        assert_eq!(report.trailing_removed, 2);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        let mut data = rows(&[&["addr", "amt"]]);
        BoundaryTrimmer::new().trim(&mut data);
        assert!(data.is_empty());

        let mut data: Vec<FieldRow> = Vec::new();
        assert_eq!(BoundaryTrimmer::new().trim(&mut data), TrimReport::default());
    }
}
