//! Error types for adapter operations.

use sea_orm::DbErr;

/// Error type for adapter operations.
///
/// Failures raised by the database are carried unchanged in
/// [`Error::Database`]; the adapter only adds the two ways reshaping a record
/// can go wrong. A missing session or user is never an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error returned by the database connection or query execution.
    #[error(transparent)]
    Database(#[from] DbErr),

    /// A record could not be turned into a table row.
    #[error("Failed to encode record: {0}")]
    Encode(String),

    /// A table row could not be turned into a record.
    #[error("Failed to decode row: {0}")]
    Decode(String),
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;
