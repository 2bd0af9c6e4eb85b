//! Error type shared by every component of the row-normalization engine.

/// Errors surfaced by the engine
///
/// `ParseError` and `InvalidAmount` are user-facing: the caller shows the
/// message and the existing rows are left untouched. `IndexOutOfRange` means the
/// caller is out of sync with the row list and should be treated as a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvHandlerError {
    #[error("Could not read rows from input: {0}")]
    ParseError(String),

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        input: String,
        reason: String,
        /// Source row (0-based, after trimming) when raised during an import
        row: Option<usize>,
    },

    #[error("Row index {index} is out of range (row count is {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Amount exceeds 256-bit capacity: {0}")]
    Overflow(String),

    #[error("Scale precision {scale} is out of range (maximum is {max})")]
    ScaleOutOfRange { scale: u32, max: u32 },

    #[error("Operation not permitted: {0}")]
    NotPermitted(&'static str),
}

pub type Result<T> = std::result::Result<T, CsvHandlerError>;

impl CsvHandlerError {
    pub fn invalid_amount<I, R>(input: I, reason: R) -> Self
    where
        I: ToString,
        R: ToString,
    {
        CsvHandlerError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
            row: None,
        }
    }

    /// Attach the source row to an `InvalidAmount`; other variants pass through
    pub fn at_row(self, index: usize) -> Self {
        match self {
            CsvHandlerError::InvalidAmount { input, reason, .. } => CsvHandlerError::InvalidAmount {
                input,
                reason,
                row: Some(index),
            },
            other => other,
        }
    }

    /// Whether the error should be reported to the user rather than treated as a logic bug
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CsvHandlerError::IndexOutOfRange { .. })
    }
}
