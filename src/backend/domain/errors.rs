use thiserror::Error;

/// Failure classes surfaced by the domain layer.
///
/// Services return these through `anyhow::Error`; callers that need to
/// distinguish a class (a missing buyer from a malformed CSV file, say) can
/// downcast with `err.downcast_ref::<DomainError>()`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed a field-level business rule.
    #[error("{0}")]
    Validation(String),

    /// An operation referenced a buyer id that does not exist.
    #[error("Buyer not found: {0}")]
    NotFound(String),

    /// A CSV row could not be parsed. Aborts the whole import batch.
    /// Rows are numbered from 1, with the header as row 1.
    #[error("Row {row}: {reason}")]
    CsvParse { row: usize, reason: String },

    /// The CSV input had no data rows at all.
    #[error("CSV file must contain at least a header row and one data row")]
    CsvTooShort,
}
