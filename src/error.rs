//! Error types for parsing formulas and running reports

use thiserror::Error;

/// Returned by `str::parse::<Formula>` when classification rejects the text.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{0} is not a formula")]
pub struct NotAFormula(pub String);

/// Result type for report runs
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while reading input or writing the report
#[derive(Debug, Error)]
pub enum ReportError {
	/// Reading the input or writing the output failed
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// The input has no first line to take the mode from
	#[error("missing mode header (expected a first line containing PARSE and/or SAT)")]
	MissingHeader,
}
