use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur while the
/// tool collates, merges, or exports the report workbooks.
///
/// Every variant is fatal: the pipeline stops at the point of detection and no
/// export artifact is produced.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the JSON summary cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the Analysis workbook lacks its designated sheet.
    #[error("Analysis.xlsx must contain a sheet named '{0}'")]
    MissingAnalysisSheet(String),

    /// Raised when the designated Analysis sheet has no join key column.
    #[error("the 'Analysis Results' sheet must contain a 'styleId' column")]
    MissingAnalysisStyleId,

    /// Raised when the right-hand side of a join lacks the key column.
    #[error("join key column '{0}' not found in the right-hand table")]
    MissingJoinKey(String),

    /// Raised when no Input sheet carries the join key column.
    #[error("Input.xlsx must contain a 'styleId' column in each data sheet")]
    MissingInputStyleId,

    /// Raised when every Input sheet is empty.
    #[error("Input.xlsx has no data rows")]
    EmptyInput,

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
