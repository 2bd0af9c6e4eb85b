//! CSV handler service for the row-normalization engine.
//!
//! This service is the single owner of a row list. It receives raw text from
//! the acquisition layer, runs it through splitting, trimming and conversion,
//! and applies user edits, deletions and scale changes.
//!
//! ## Key Responsibilities
//!
//! - **Import**: raw text → split → trim → convert → wholesale replace
//! - **Last Write Wins**: stale acquisitions are discarded, never merged
//! - **Editing**: display amounts typed by the user go through the converter
//! - **Rescaling**: scale precision changes rewrite every stored amount
//! - **Presentation**: formatted row table and totals for the UI/CLI
//!
//! A failed import or edit leaves the existing rows untouched.

use std::sync::Arc;

use shared::{DeleteRowRequest, DisplayRow, EditRowRequest, ImportOutcome, ImportSummary, RowTableResponse};
use tracing::{error, info, warn};

use crate::domain::boundary_trimmer::{BoundaryTrimmer, TrimReport};
use crate::domain::config::HandlerConfig;
use crate::domain::error::{CsvHandlerError, Result};
use crate::domain::fixed_point::Formatters;
use crate::domain::models::{Row, ScalePrecision, ScaledAmount};
use crate::domain::row_list::RowList;
use crate::domain::tabular_splitter::TabularSplitter;
use crate::domain::traits::AddressVerifier;

/// Handed out when an acquisition starts; only the latest ticket may apply its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionTicket {
    epoch: u64,
}

#[derive(Clone)]
pub struct CsvHandlerService {
    config: HandlerConfig,
    scale: ScalePrecision,
    rows: RowList,
    splitter: TabularSplitter,
    trimmer: BoundaryTrimmer,
    /// Bumped by every new acquisition and every committed import
    epoch: u64,
    verifier: Option<Arc<dyn AddressVerifier>>,
}

impl CsvHandlerService {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            scale: config.scale,
            splitter: TabularSplitter::with_config(config.splitter.clone()),
            trimmer: BoundaryTrimmer::new(),
            rows: RowList::new(),
            epoch: 0,
            verifier: None,
            config,
        }
    }

    /// Attach an advisory address check
    pub fn with_verifier<V>(mut self, verifier: V) -> Self
    where
        V: AddressVerifier + 'static,
    {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    pub fn scale(&self) -> ScalePrecision {
        self.scale
    }

    pub fn rows(&self) -> &RowList {
        &self.rows
    }

    pub fn formatters(&self) -> Formatters {
        Formatters::with_config(self.scale, self.config.display.clone())
    }

    /// Mark the start of a file or clipboard read
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_acquisition(&mut self) -> AcquisitionTicket {
        self.epoch += 1;
        AcquisitionTicket { epoch: self.epoch }
    }

    /// Apply text from an acquisition unless something newer happened since it started
    pub fn on_raw_text_for(&mut self, ticket: AcquisitionTicket, text: &str) -> Result<ImportOutcome> {
        if ticket.epoch != self.epoch {
            info!(
                "Discarding superseded input (ticket {}, current {})",
                ticket.epoch, self.epoch
            );
            return Ok(ImportOutcome::Superseded);
        }
        self.on_raw_text(text).map(ImportOutcome::Applied)
    }

    /// Parse raw text and replace every row with the result
    pub fn on_raw_text(&mut self, text: &str) -> Result<ImportSummary> {
        info!("Importing {} bytes of raw text at scale {}", text.len(), self.scale);

        let (rows, report) = self.parse_text(text).map_err(|e| {
            warn!("Import rejected, keeping {} existing rows: {}", self.rows.len(), e);
            e
        })?;
        self.rows.insert_from_parse(rows).map_err(|e| {
            warn!("Import rejected, keeping {} existing rows: {}", self.rows.len(), e);
            e
        })?;
        self.epoch += 1;

        let summary = ImportSummary {
            rows_imported: self.rows.len(),
            header_removed: report.header_removed,
            trailing_removed: report.trailing_removed,
            total_amount: self.total_display(),
        };
        info!(
            "Imported {} rows (header removed: {}, trailing removed: {}), total {}",
            summary.rows_imported, summary.header_removed, summary.trailing_removed, summary.total_amount
        );
        Ok(summary)
    }

    fn parse_text(&self, text: &str) -> Result<(Vec<Row>, TrimReport)> {
        let mut field_rows = self.splitter.split(text)?;
        let report = self.trimmer.trim(&mut field_rows);

        let rows = field_rows
            .iter()
            .enumerate()
            .map(|(i, fields)| {
                let address = fields.first().map(|f| f.to_string()).unwrap_or_default();
                let amount = match fields.get(1) {
                    Some(field) => self.convert(&field.to_string()),
                    None => Err(CsvHandlerError::invalid_amount("", "amount column is missing")),
                }
                .map_err(|e| e.at_row(i))?;
                Ok(Row::new(address, amount))
            })
            .collect::<Result<Vec<Row>>>()?;

        Ok((rows, report))
    }

    /// Display text → real units, enforcing the integral-amount policy
    fn convert(&self, display: &str) -> Result<ScaledAmount> {
        let amount = self.formatters().to_real(display)?;
        if self.config.require_integral_amounts && !amount.is_integral() {
            return Err(CsvHandlerError::invalid_amount(
                display,
                format!("more than {} fractional digits", self.scale),
            ));
        }
        Ok(amount)
    }

    /// Rewrite every stored amount for a new scale precision
    pub fn on_scale_changed(&mut self, new_scale: u32) -> Result<()> {
        let to = ScalePrecision::new(new_scale)?;
        if to == self.scale {
            return Ok(());
        }
        self.rows.rescale(self.scale, to).map_err(|e| {
            warn!("Rescale from {} to {} failed: {}", self.scale, to, e);
            e
        })?;
        info!("Rescaled {} rows from {} to {}", self.rows.len(), self.scale, to);
        self.scale = to;
        Ok(())
    }

    pub fn on_delete_row(&mut self, index: usize) -> Result<Row> {
        if !self.config.is_deletable {
            return Err(CsvHandlerError::NotPermitted("rows are not deletable"));
        }
        let removed = self.rows.delete_at(index).map_err(Self::log_logic_error)?;
        info!("Deleted row {} ({})", index, removed.address);
        Ok(removed)
    }

    /// Commit an edit; the amount is converted from display text at this point
    pub fn on_edit_row(&mut self, index: usize, new_address: &str, new_display_amount: &str) -> Result<()> {
        if !self.config.is_editable {
            return Err(CsvHandlerError::NotPermitted("rows are not editable"));
        }
        let amount = self.convert(new_display_amount)?;
        self.rows
            .edit_at(index, new_address.to_string(), amount)
            .map_err(Self::log_logic_error)?;
        info!("Edited row {}", index);
        Ok(())
    }

    pub fn apply_edit(&mut self, request: EditRowRequest) -> Result<()> {
        self.on_edit_row(request.index, &request.address, &request.amount)
    }

    pub fn apply_delete(&mut self, request: DeleteRowRequest) -> Result<Row> {
        self.on_delete_row(request.index)
    }

    fn log_logic_error(e: CsvHandlerError) -> CsvHandlerError {
        if !e.is_user_facing() {
            error!("Row list out of sync with caller: {}", e);
        }
        e
    }

    pub fn total_display(&self) -> String {
        self.formatters().to_display(self.rows.total())
    }

    /// Snapshot of the rows and totals formatted for display
    pub fn table(&self) -> RowTableResponse {
        let formatters = self.formatters();
        let rows = self
            .rows
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| DisplayRow {
                index,
                address: row.address.clone(),
                amount: formatters.to_display(&row.amount),
                real_amount: row.amount.to_string(),
                address_valid: self.verifier.as_ref().map(|v| v.verify(&row.address)),
            })
            .collect();

        RowTableResponse {
            rows,
            total_addresses: self.rows.len(),
            total_amount: formatters.to_display(self.rows.total()),
            total_real_amount: self.rows.total().to_string(),
            scale: self.scale.digits(),
        }
    }
}

impl Default for CsvHandlerService {
    fn default() -> Self {
        Self::new(HandlerConfig::default())
    }
}
