use serde::{Deserialize, Serialize};

/// A single address/amount row formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Position in the row list (0-based). Invalidated by any deletion.
    pub index: usize,
    pub address: String,
    /// Amount in display units with grouping separators (e.g. "1,234.56")
    pub amount: String,
    /// Canonical amount in real (scaled) units, no separators
    pub real_amount: String,
    /// Result of the advisory address check, `None` when no verifier is configured
    pub address_valid: Option<bool>,
}

/// Snapshot of the whole row list as presented to a UI or CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTableResponse {
    pub rows: Vec<DisplayRow>,
    pub total_addresses: usize,
    /// Total in display units with grouping separators
    pub total_amount: String,
    /// Total in real units
    pub total_real_amount: String,
    /// Number of fractional digits implied by the real amounts
    pub scale: u32,
}

impl RowTableResponse {
    /// Rows whose address failed the advisory check
    pub fn flagged_rows(&self) -> impl Iterator<Item = &DisplayRow> {
        self.rows.iter().filter(|row| row.address_valid == Some(false))
    }
}

/// Result of feeding raw text into the row list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportOutcome {
    /// The text was parsed and replaced the existing rows
    Applied(ImportSummary),
    /// A newer acquisition or replacement happened first; the text was discarded
    Superseded,
}

/// What an import did to the row list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows_imported: usize,
    pub header_removed: bool,
    pub trailing_removed: usize,
    pub total_amount: String,
}

/// Request for editing a row in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRowRequest {
    pub index: usize,
    pub address: String,
    /// Amount as typed by the user, in display units
    pub amount: String,
}

/// Request for deleting a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRowRequest {
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, address_valid: Option<bool>) -> DisplayRow {
        DisplayRow {
            index,
            address: format!("0x{}", index),
            amount: "1".to_string(),
            real_amount: "100".to_string(),
            address_valid,
        }
    }

    #[test]
    fn test_flagged_rows() {
        let table = RowTableResponse {
            rows: vec![row(0, Some(true)), row(1, Some(false)), row(2, None)],
            total_addresses: 3,
            total_amount: "3".to_string(),
            total_real_amount: "300".to_string(),
            scale: 2,
        };

        let flagged: Vec<usize> = table.flagged_rows().map(|r| r.index).collect();
        assert_eq!(flagged, vec![1]);
    }

    #[test]
    fn test_import_outcome_serialization() {
        let outcome = ImportOutcome::Applied(ImportSummary {
            rows_imported: 2,
            header_removed: true,
            trailing_removed: 1,
            total_amount: "1,000".to_string(),
        });

        let json = serde_json::to_string(&outcome).unwrap();
        let back: ImportOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);

        let json = serde_json::to_string(&ImportOutcome::Superseded).unwrap();
        assert_eq!(json, "\"Superseded\"");
    }
}
