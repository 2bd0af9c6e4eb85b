//! # Domain Module
//!
//! The row-normalization engine: everything between a raw text blob and a
//! totalled, editable list of address/amount rows.
//!
//! ## Module Organization
//!
//! - **tabular_splitter**: raw text → rows of untyped fields
//! - **boundary_trimmer**: drops a header row and trailing non-data rows
//! - **fixed_point**: exact display ↔ real amount conversion and formatting
//! - **row_list**: the ordered dataset with edit/delete and a cached total
//! - **rescale**: rewrites amounts when the scale precision changes
//! - **total**: exact summation
//! - **csv_handler_service**: orchestrates the above for a single owner
//!
//! ## Business Rules
//!
//! - Amounts are exact decimals in real units; floats are never involved
//! - A failed import or edit leaves the existing rows untouched
//! - Row indices are positional and shift on deletion
//! - The newest acquisition wins; stale text is discarded

pub mod boundary_trimmer;
pub mod config;
pub mod csv_handler_service;
pub mod error;
pub mod fixed_point;
pub mod models;
pub mod rescale;
pub mod row_list;
pub mod tabular_splitter;
pub mod total;
pub mod traits;

pub use boundary_trimmer::*;
pub use config::*;
pub use csv_handler_service::*;
pub use error::*;
pub use fixed_point::*;
pub use models::*;
pub use rescale::*;
pub use row_list::*;
pub use tabular_splitter::*;
pub use total::*;
pub use traits::*;
