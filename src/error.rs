//! Defines the crate level error type.
//!
//! The pipeline itself never fails: bad records degrade to zero or
//! unfiltered states. These errors come from the host-facing edges, such as
//! loading input files and resolving the current time.

/// The errors that may occur while preparing pipeline inputs.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A file could not be read.
    ///
    /// Callers should pass in the path and the original error as a string.
    #[error("could not read \"{0}\": {1}")]
    ReadFile(String, String),

    /// The transaction export was not valid JSON or did not have the
    /// expected shape.
    #[error("could not parse transactions: {0}")]
    InvalidTransactions(String),

    /// The filter file was not a valid filter configuration.
    #[error("could not parse filters: {0}")]
    InvalidFilters(String),

    /// The pipeline configuration was malformed or out of range.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The result could not be serialized for output.
    #[error("could not write output: {0}")]
    WriteOutput(String),

    /// A date given on the command line could not be parsed.
    #[error("invalid date \"{0}\", expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}
