//! # CSV Handler Backend
//!
//! Turns pasted or uploaded tabular text into an editable list of
//! address/amount rows with an exact running total. Amounts are stored in
//! "real" units (display value × 10^scale) and shown in grouped display units.
//!
//! - `domain`: splitting, trimming, fixed-point conversion and the row list
//! - `io`: text acquisition and plain-text rendering for the CLI

use tracing::info;

pub mod domain;
pub mod io;

pub use domain::{CsvHandlerError, CsvHandlerService, HandlerConfig};

/// Build a handler service from configuration
pub fn initialize_backend(config: HandlerConfig) -> CsvHandlerService {
    info!(
        "Initializing CSV handler at scale {} (deletable: {}, editable: {})",
        config.scale, config.is_deletable, config.is_editable
    );
    CsvHandlerService::new(config)
}
