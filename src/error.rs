use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for summary computation and report generation.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV/JSON/Parquet (and optional Excel) ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet ingestion error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The input does not conform to the provided schema (missing required fields/columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Coarse classification of a [`SummaryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input dataset is missing, malformed, or cannot be summarized.
    Data,
    /// A report could not be written to its destination.
    Write,
    /// An unsupported report format was requested.
    Format,
}

/// Error type returned by summary computation, rendering and the report pipeline.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Loading the input dataset failed.
    #[error("data error: {0}")]
    Ingestion(#[from] IngestionError),

    /// A column could not be summarized.
    #[error("data error in column '{column}': {message}")]
    Data { column: String, message: String },

    /// Writing a report file failed.
    #[error("write error for {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building the workbook failed.
    #[error("write error for {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// The requested report format is not one of text/html/xlsx.
    #[error("unsupported report format '{requested}' (expected text, html or xlsx)")]
    UnsupportedFormat { requested: String },

    /// The configuration could not be read, parsed, or is incomplete.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SummaryError {
    /// Returns which of the three failure kinds this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ingestion(_) | Self::Data { .. } | Self::Config { .. } => ErrorKind::Data,
            Self::Write { .. } | Self::Xlsx { .. } => ErrorKind::Write,
            Self::UnsupportedFormat { .. } => ErrorKind::Format,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
