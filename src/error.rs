//! Error types for the invoicing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing attendance data
//! and producing invoices.

use thiserror::Error;

use crate::models::MonthKey;

/// The main error type for the invoicing engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use invoice_engine::error::EngineError;
///
/// let error = EngineError::ChildNotFound {
///     id: "missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Child not found: missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A month key string was not in `YYYY-MM` form or named an invalid month.
    #[error("Invalid month key '{value}': expected YYYY-MM")]
    InvalidMonthKey {
        /// The raw value that failed to parse.
        value: String,
    },

    /// An attempt was made to create a billing month that already exists.
    #[error("Month {month} already exists")]
    DuplicateMonth {
        /// The month that was already present.
        month: MonthKey,
    },

    /// A billing month was referenced that does not exist in the document.
    #[error("Month {month} not found")]
    MonthNotFound {
        /// The month that was requested.
        month: MonthKey,
    },

    /// A child id was referenced that does not exist in the given month.
    #[error("Child not found: {id}")]
    ChildNotFound {
        /// The id that was requested.
        id: String,
    },

    /// The persisted application document could not be parsed.
    #[error("Failed to parse application document: {message}")]
    DocumentParse {
        /// A description of the parse error.
        message: String,
    },

    /// The application document could not be serialized.
    #[error("Failed to serialize application document: {message}")]
    DocumentSerialize {
        /// A description of the serialization error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
