use thiserror::Error;

/// Failures raised by the calendar lookups.
///
/// A date outside the supported year is not an error; `status` reports it as
/// `BusinessStatus::Undefined`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The path segments do not form a real calendar date.
    #[error("{0}")]
    InvalidDate(String),

    /// No holiday data for the requested year or month.
    #[error("{0}")]
    NotFound(String),

    /// A holiday entry could not be placed in the table.
    #[error("Invalid calendar table: {0}")]
    InvalidTable(String),
}
